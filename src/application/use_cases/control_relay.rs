use crate::application::GatewayError;
use crate::domain::device::{DeviceClient, RelayStatus, StateStore, ValidationError};
use crate::domain::journal::{Journal, JournalEntry, JournalEntryKind};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

/// リレーのオン・オフをデバイスへ送信する
#[derive(Clone)]
pub struct ControlRelayUseCase {
    store: Arc<StateStore>,
    device: Arc<dyn DeviceClient>,
    journal: Arc<dyn Journal>,
}

impl ControlRelayUseCase {
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

    pub async fn execute(&self, body: &Value) -> Result<RelayStatus, GatewayError> {
        let status: RelayStatus = body
            .get("status")
            .and_then(Value::as_str)
            .ok_or(ValidationError::InvalidRelayStatus)?
            .parse()?;

        if let Err(e) = self.device.send_relay_command(status).await {
            warn!(error = %e, status = %status, "Device rejected relay command");
            return Err(e.into());
        }

        info!(status = %status, "Relay command applied");
        self.store.set_relay(status);

        self.journal
            .append(JournalEntry::new(
                JournalEntryKind::ControlRelay,
                json!({"status": status, "result": "success"}),
            ))
            .await;

        Ok(status)
    }
}
