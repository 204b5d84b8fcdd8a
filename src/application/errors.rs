use crate::domain::device::{DeviceError, ValidationError};
use thiserror::Error;

/// ゲートウェイの操作が返すエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl GatewayError {
    /// クライアントに返すメッセージ
    ///
    /// 転送層の生のエラーはそのまま返さず、操作者向けの文言に置き換える。
    pub fn client_message(&self) -> String {
        match self {
            GatewayError::Device(DeviceError::Unreachable(_)) => {
                "Could not connect to device. Check address and network.".to_string()
            }
            GatewayError::Device(DeviceError::Timeout) => {
                "Timeout connecting to device.".to_string()
            }
            GatewayError::Device(DeviceError::BadStatus(status)) => {
                format!("Device returned status: {status}")
            }
            GatewayError::Device(DeviceError::InvalidBody(_)) => {
                "Device sent an unreadable response.".to_string()
            }
            GatewayError::Device(DeviceError::Request(_)) => {
                "Could not issue request to device.".to_string()
            }
            GatewayError::Internal(_) => "An unexpected error occurred".to_string(),
            other => other.to_string(),
        }
    }
}
