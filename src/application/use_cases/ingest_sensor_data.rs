use crate::application::GatewayError;
use crate::domain::device::{DeviceState, StateStore, ValidationError};
use crate::domain::journal::{Journal, JournalEntry, JournalEntryKind};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// デバイスから送られてきたテレメトリを取り込む（プッシュ方式）
#[derive(Clone)]
pub struct IngestSensorDataUseCase {
    store: Arc<StateStore>,
    journal: Arc<dyn Journal>,
}

impl IngestSensorDataUseCase {
    pub fn new(store: Arc<StateStore>, journal: Arc<dyn Journal>) -> Self {
        Self { store, journal }
    }

    pub async fn execute(&self, body: Value) -> Result<DeviceState, GatewayError> {
        let Value::Object(telemetry) = body else {
            return Err(ValidationError::NotJson.into());
        };

        info!(keys = telemetry.len(), "Received sensor data from device");
        let state = self.store.merge_update(&telemetry);
        self.journal
            .append(JournalEntry::new(
                JournalEntryKind::Telemetry,
                Value::Object(telemetry),
            ))
            .await;

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journal::NullJournal;
    use serde_json::json;

    #[tokio::test]
    async fn test_pushed_telemetry_is_merged() {
        let store = Arc::new(StateStore::default());
        let use_case = IngestSensorDataUseCase::new(store.clone(), Arc::new(NullJournal));

        let state = use_case
            .execute(json!({"load_voltage": 11.9, "relay_status": "on"}))
            .await
            .unwrap();
        assert_eq!(state.load_voltage, 11.9);
        assert_eq!(store.get().target_voltage, 7.0);
    }

    #[tokio::test]
    async fn test_non_object_payload_is_rejected() {
        let store = Arc::new(StateStore::default());
        let use_case = IngestSensorDataUseCase::new(store.clone(), Arc::new(NullJournal));

        assert!(use_case.execute(json!([1, 2, 3])).await.is_err());
        assert_eq!(store.get(), DeviceState::default());
    }
}
