//! # Buck-Boost Gateway
//!
//! ESP32 で制御する昇降圧コンバーターのためのブラウザ向けゲートウェイ。
//! オペレーターを認証し、デバイスのテレメトリを取得・キャッシュして、
//! 目標電圧・電流やリレーのコマンドをデバイスへ転送する。
//!
//! このクレートは以下の層に分かれています：
//!
//! - **Domain Layer**: デバイス状態、セッション、ジャーナルのモデル
//! - **Application Layer**: ゲートウェイの各操作を表すユースケース
//! - **Infrastructure Layer**: デバイスとのHTTP通信、セッションストア、ファイル出力
//! - **Interface Layer**: Web API とブラウザ向けページ

pub mod application;
pub mod debug;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

use domain::device::DeviceVariant;
use std::path::PathBuf;
use std::time::Duration;

/// パスワードの設定方法
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordSetting {
    Plain(String),
    /// `sha256$<salt>$<hex digest>` 形式
    Hashed(String),
}

/// `/sensor_data_post` の認証方針
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SensorAuthPolicy {
    /// 認証なしで受け付ける
    #[default]
    Open,
    /// ログイン済みセッション、または `X-Device-Key` ヘッダーを要求する
    Enforced { device_key: Option<String> },
}

/// ゲートウェイ全体の設定
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub device_url: String,
    pub device_timeout: Duration,
    pub variant: DeviceVariant,
    pub username: String,
    pub password: PasswordSetting,
    pub session_ttl: Duration,
    /// `None` の場合ジャーナルを出力しない
    pub journal_dir: Option<PathBuf>,
    pub sensor_auth: SensorAuthPolicy,
    /// 実機の代わりに模擬デバイスを使う
    pub simulate: bool,
}
