use super::{DeviceError, OutputParams, RelayStatus, Telemetry};
use async_trait::async_trait;

/// リモートのパワーコントロールデバイスへのクライアント
///
/// 各呼び出しは1回だけ試行し、ローカルの状態は変更しない。
/// 結果をキャッシュへ反映するのは呼び出し側の責務。
#[async_trait]
pub trait DeviceClient: Send + Sync {
    /// 現在のテレメトリを取得
    async fn fetch_telemetry(&self) -> Result<Telemetry, DeviceError>;

    /// 出力パラメータを送信
    async fn send_output_params(&self, params: &OutputParams) -> Result<(), DeviceError>;

    /// リレーの切り替えを送信
    async fn send_relay_command(&self, status: RelayStatus) -> Result<(), DeviceError>;

    /// ログやダッシュボード表示用の接続先
    fn endpoint(&self) -> &str;
}
