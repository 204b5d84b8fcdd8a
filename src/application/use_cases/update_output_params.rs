use crate::application::GatewayError;
use crate::domain::device::{DeviceClient, DeviceVariant, OutputParams, StateStore};
use crate::domain::journal::{Journal, JournalEntry, JournalEntryKind};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

/// 目標電圧（と電流）をデバイスへ送信する
#[derive(Clone)]
pub struct UpdateOutputParamsUseCase {
    store: Arc<StateStore>,
    device: Arc<dyn DeviceClient>,
    journal: Arc<dyn Journal>,
    variant: DeviceVariant,
}

impl UpdateOutputParamsUseCase {
    pub fn new(
        store: Arc<StateStore>,
        device: Arc<dyn DeviceClient>,
        journal: Arc<dyn Journal>,
        variant: DeviceVariant,
    ) -> Self {
        Self {
            store,
            device,
            journal,
            variant,
        }
    }

    pub async fn execute(&self, body: &Value) -> Result<OutputParams, GatewayError> {
        // デバイスへ送る前に検証する
        let params = OutputParams::from_request(body, self.variant)?;

        if let Err(e) = self.device.send_output_params(&params).await {
            warn!(error = %e, voltage = params.voltage, "Device rejected output parameters");
            return Err(e.into());
        }

        info!(
            voltage = params.voltage,
            current = ?params.current,
            "Output parameters sent to device"
        );
        self.store.apply_output(&params);

        self.journal
            .append(JournalEntry::new(
                JournalEntryKind::SetOutput,
                json!({
                    "voltage": params.voltage,
                    "current": params.current,
                    "status": "success",
                }),
            ))
            .await;

        Ok(params)
    }
}
