//! デバイス状態エンティティ
//!
//! ゲートウェイが最後に把握したデバイスのテレメトリと目標値を表す。

use super::value_objects::{DeviceConfig, DeviceVariant, RelayStatus, TargetField, parse_number};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

pub const DEFAULT_TARGET_VOLTAGE: f64 = 7.0;
pub const DEFAULT_TARGET_CURRENT_MA: f64 = 500.0;

/// 最後に既知のデバイス状態
///
/// JSONのキー名はデバイスのファームウェアが送るものに合わせている。
/// 既知のキー以外に送られてきた値は `extra` に保持し、そのまま返す。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub bus_voltage: f64,
    pub shunt_voltage: f64,
    pub load_voltage: f64,
    #[serde(rename = "current_mA")]
    pub current_ma: f64,
    #[serde(rename = "power_W")]
    pub power_w: f64,
    pub target_voltage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_current: Option<f64>,
    pub relay_status: RelayStatus,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DeviceState {
    /// 起動時の既定値
    pub fn initial(variant: DeviceVariant) -> Self {
        Self {
            bus_voltage: 0.0,
            shunt_voltage: 0.0,
            load_voltage: 0.0,
            current_ma: 0.0,
            power_w: 0.0,
            target_voltage: DEFAULT_TARGET_VOLTAGE,
            target_current: variant
                .supports_current_control
                .then_some(DEFAULT_TARGET_CURRENT_MA),
            relay_status: RelayStatus::Off,
            extra: BTreeMap::new(),
        }
    }

    /// 部分マージ
    ///
    /// `partial` に含まれるキーだけを上書きする。型が合わない値は無視し、
    /// 以前の値を保持する。
    pub fn merge(&mut self, partial: &Map<String, Value>) {
        for (key, value) in partial {
            match key.as_str() {
                "bus_voltage" => assign_number(&mut self.bus_voltage, key, value),
                "shunt_voltage" => assign_number(&mut self.shunt_voltage, key, value),
                "load_voltage" => assign_number(&mut self.load_voltage, key, value),
                "current_mA" => assign_number(&mut self.current_ma, key, value),
                "power_W" => assign_number(&mut self.power_w, key, value),
                "target_voltage" => assign_number(&mut self.target_voltage, key, value),
                "target_current" => match parse_number(value) {
                    Some(number) => self.target_current = Some(number),
                    None => warn!(key = %key, value = %value, "Ignoring non-numeric telemetry value"),
                },
                "relay_status" => match RelayStatus::from_value(value) {
                    Some(status) => self.relay_status = status,
                    None => warn!(value = %value, "Ignoring unrecognised relay status"),
                },
                _ => {
                    self.extra.insert(key.clone(), value.clone());
                }
            }
        }
    }

    pub fn set_target(&mut self, field: TargetField, value: f64) {
        match field {
            TargetField::Voltage => self.target_voltage = value,
            TargetField::Current => self.target_current = Some(value),
        }
    }

    pub fn device_config(&self) -> DeviceConfig {
        DeviceConfig {
            target_voltage: self.target_voltage,
            target_current: self.target_current,
            relay_status_default: self.relay_status,
        }
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::initial(DeviceVariant::default())
    }
}

fn assign_number(slot: &mut f64, key: &str, value: &Value) {
    match parse_number(value) {
        Some(number) => *slot = number,
        None => warn!(key = %key, value = %value, "Ignoring non-numeric telemetry value"),
    }
}
