use crate::domain::device::{
    DeviceClient, DeviceError, DeviceVariant, OutputParams, RelayStatus, Telemetry,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

const SHUNT_RESISTANCE_OHMS: f64 = 0.1;
const SIMULATED_LOAD_OHMS: f64 = 24.0;

#[derive(Debug)]
struct SimulatedOutput {
    target_voltage: f64,
    target_current: Option<f64>,
    relay: RelayStatus,
}

/// プロセス内で動作する模擬デバイス
///
/// 受け取ったコマンドを自身のテレメトリにそのまま反映する。実機がない環境での
/// 動作確認とテストに使う。
pub struct SimulatedDevice {
    output: Mutex<SimulatedOutput>,
    failure: Mutex<Option<DeviceError>>,
    fetches: AtomicUsize,
    commands: AtomicUsize,
}

impl SimulatedDevice {
    pub fn new(variant: DeviceVariant) -> Self {
        info!("Initializing simulated device...");
        Self {
            output: Mutex::new(SimulatedOutput {
                target_voltage: 7.0,
                target_current: variant.supports_current_control.then_some(500.0),
                relay: RelayStatus::Off,
            }),
            failure: Mutex::new(None),
            fetches: AtomicUsize::new(0),
            commands: AtomicUsize::new(0),
        }
    }

    /// 以降のすべての呼び出しを指定したエラーで失敗させる（`None` で解除）
    pub fn fail_with(&self, error: Option<DeviceError>) {
        *self.failure.lock() = error;
    }

    pub fn set_relay(&self, status: RelayStatus) {
        self.output.lock().relay = status;
    }

    pub fn relay(&self) -> RelayStatus {
        self.output.lock().relay
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// 受け付けた書き込み系の呼び出し回数（失敗した呼び出しも含む）
    pub fn command_count(&self) -> usize {
        self.commands.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), DeviceError> {
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DeviceClient for SimulatedDevice {
    async fn fetch_telemetry(&self) -> Result<Telemetry, DeviceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let output = self.output.lock();
        let load_voltage = match output.relay {
            RelayStatus::On => output.target_voltage,
            RelayStatus::Off => 0.0,
        };
        let mut current_ma = load_voltage / SIMULATED_LOAD_OHMS * 1000.0;
        if let Some(limit) = output.target_current {
            current_ma = current_ma.min(limit);
        }
        let shunt_voltage = current_ma / 1000.0 * SHUNT_RESISTANCE_OHMS;

        let mut telemetry = json!({
            "bus_voltage": load_voltage - shunt_voltage,
            "shunt_voltage": shunt_voltage,
            "load_voltage": load_voltage,
            "current_mA": current_ma,
            "power_W": load_voltage * current_ma / 1000.0,
            "target_voltage": output.target_voltage,
            "relay_status": output.relay,
        });
        if let Some(limit) = output.target_current {
            telemetry["target_current"] = json!(limit);
        }

        match telemetry {
            serde_json::Value::Object(map) => Ok(map),
            _ => Err(DeviceError::InvalidBody("simulated telemetry".to_string())),
        }
    }

    async fn send_output_params(&self, params: &OutputParams) -> Result<(), DeviceError> {
        self.commands.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        debug!(voltage = params.voltage, current = ?params.current, "Simulated output change");
        let mut output = self.output.lock();
        output.target_voltage = params.voltage;
        if params.current.is_some() {
            output.target_current = params.current;
        }
        Ok(())
    }

    async fn send_relay_command(&self, status: RelayStatus) -> Result<(), DeviceError> {
        self.commands.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        debug!(status = %status, "Simulated relay change");
        self.output.lock().relay = status;
        Ok(())
    }

    fn endpoint(&self) -> &str {
        "simulated"
    }
}
