//! デバイス状態ストア
//!
//! プロセス内で唯一の `DeviceState` を所有し、単一のロックで読み書きを直列化する。

use super::{DeviceConfig, DeviceState, DeviceVariant, OutputParams, RelayStatus, TargetField};
use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug)]
pub struct StateStore {
    state: RwLock<DeviceState>,
}

impl StateStore {
    pub fn new(variant: DeviceVariant) -> Self {
        Self::with_state(DeviceState::initial(variant))
    }

    pub fn with_state(state: DeviceState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// 現在のスナップショットを複製して返す
    pub fn get(&self) -> DeviceState {
        self.state.read().clone()
    }

    /// `partial` に含まれるキーだけを上書きし、更新後のスナップショットを返す
    pub fn merge_update(&self, partial: &Map<String, Value>) -> DeviceState {
        let mut state = self.state.write();
        state.merge(partial);
        debug!(keys = partial.len(), "Merged device telemetry");
        state.clone()
    }

    pub fn set_target(&self, field: TargetField, value: f64) {
        self.state.write().set_target(field, value);
    }

    /// デバイスが受け付けた目標値を一度のロックで反映する
    pub fn apply_output(&self, params: &OutputParams) {
        let mut state = self.state.write();
        state.set_target(TargetField::Voltage, params.voltage);
        if let Some(current) = params.current {
            state.set_target(TargetField::Current, current);
        }
    }

    pub fn set_relay(&self, status: RelayStatus) {
        self.state.write().relay_status = status;
    }

    pub fn device_config(&self) -> DeviceConfig {
        self.state.read().device_config()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(DeviceVariant::default())
    }
}
