//! デバイス関連の値オブジェクト

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// デバイスから受信した生のテレメトリ（JSONオブジェクト）
pub type Telemetry = Map<String, Value>;

/// リレーの状態
///
/// キャッシュ上では常に大文字の `ON` / `OFF` として保持する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RelayStatus {
    On,
    #[default]
    Off,
}

impl RelayStatus {
    /// デバイスのファームウェアが期待する小文字のトークン
    pub fn as_command_token(&self) -> &'static str {
        match self {
            RelayStatus::On => "on",
            RelayStatus::Off => "off",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RelayStatus::On => "ON",
            RelayStatus::Off => "OFF",
        }
    }

    /// テレメトリ上の任意のJSON値からリレー状態を読み取る
    ///
    /// 文字列（大文字小文字を問わない）、真偽値、0/1 を受け付ける。
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => s.parse().ok(),
            Value::Bool(true) => Some(RelayStatus::On),
            Value::Bool(false) => Some(RelayStatus::Off),
            Value::Number(n) => match n.as_i64() {
                Some(1) => Some(RelayStatus::On),
                Some(0) => Some(RelayStatus::Off),
                _ => None,
            },
            _ => None,
        }
    }
}

impl FromStr for RelayStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" => Ok(RelayStatus::On),
            "off" => Ok(RelayStatus::Off),
            _ => Err(ValidationError::InvalidRelayStatus),
        }
    }
}

impl fmt::Display for RelayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 書き込み成功後に更新する目標値のフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetField {
    Voltage,
    Current,
}

/// 接続先デバイスのファームウェアの種類
///
/// 電流制御に対応しないファームウェアでは `current` を要求も送信もしない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceVariant {
    pub supports_current_control: bool,
}

impl DeviceVariant {
    pub const VOLTAGE_ONLY: Self = Self {
        supports_current_control: false,
    };

    pub const VOLTAGE_CURRENT: Self = Self {
        supports_current_control: true,
    };
}

impl Default for DeviceVariant {
    fn default() -> Self {
        Self::VOLTAGE_CURRENT
    }
}

/// 検証済みの出力パラメータ
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputParams {
    pub voltage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
}

impl OutputParams {
    /// リクエストボディのJSONから出力パラメータを検証して組み立てる
    ///
    /// 数値と数値文字列を受け付け、有限値でないものは拒否する。
    pub fn from_request(body: &Value, variant: DeviceVariant) -> Result<Self, ValidationError> {
        let voltage =
            parse_number(required_field(body, "voltage")?).ok_or(ValidationError::InvalidFormat)?;
        let current = if variant.supports_current_control {
            let value = required_field(body, "current")?;
            Some(parse_number(value).ok_or(ValidationError::InvalidFormat)?)
        } else {
            None
        };

        Ok(Self { voltage, current })
    }
}

fn required_field<'a>(body: &'a Value, name: &'static str) -> Result<&'a Value, ValidationError> {
    match body.get(name) {
        None | Some(Value::Null) => Err(ValidationError::MissingParameter(name)),
        Some(value) => Ok(value),
    }
}

/// 数値または数値文字列を有限の f64 として読み取る
pub fn parse_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// デバイスが起動時に取得する設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub target_voltage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_current: Option<f64>,
    pub relay_status_default: RelayStatus,
}
