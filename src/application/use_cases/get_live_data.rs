use crate::application::GatewayError;
use crate::domain::device::{DeviceClient, DeviceState, StateStore};
use crate::domain::journal::{Journal, JournalEntry, JournalEntryKind};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// 最新のテレメトリを取得してキャッシュへ反映する
///
/// デバイスに届かない場合は最後に既知の状態を返す。
#[derive(Clone)]
pub struct GetLiveDataUseCase {
    store: Arc<StateStore>,
    device: Arc<dyn DeviceClient>,
    journal: Arc<dyn Journal>,
}

impl GetLiveDataUseCase {
    pub fn new(
        store: Arc<StateStore>,
        device: Arc<dyn DeviceClient>,
        journal: Arc<dyn Journal>,
    ) -> Self {
        Self {
            store,
            device,
            journal,
        }
    }

    pub async fn execute(&self) -> Result<DeviceState, GatewayError> {
        match self.device.fetch_telemetry().await {
            Ok(telemetry) => {
                let state = self.store.merge_update(&telemetry);
                self.journal
                    .append(JournalEntry::new(
                        JournalEntryKind::Telemetry,
                        Value::Object(telemetry),
                    ))
                    .await;
                debug!("Live data refreshed from device");
                Ok(state)
            }
            Err(e) if e.is_transient() => {
                warn!(error = %e, "Error fetching live data, using last known data");
                Ok(self.store.get())
            }
            Err(e) => {
                error!(error = %e, "Unexpected error while fetching live data");
                Err(GatewayError::Internal(e.to_string()))
            }
        }
    }

    /// ダッシュボード描画用の更新
    ///
    /// どのような失敗でもキャッシュされた状態を返す。
    pub async fn refresh_best_effort(&self) -> DeviceState {
        match self.execute().await {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "Could not refresh device data, using defaults");
                self.store.get()
            }
        }
    }
}
