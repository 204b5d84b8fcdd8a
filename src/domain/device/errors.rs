use thiserror::Error;

/// デバイスとの通信で発生するエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeviceError {
    #[error("device unreachable: {0}")]
    Unreachable(String),

    #[error("device request timed out")]
    Timeout,

    #[error("device returned status: {0}")]
    BadStatus(u16),

    #[error("device sent an undecodable body: {0}")]
    InvalidBody(String),

    #[error("device request could not be issued: {0}")]
    Request(String),
}

impl DeviceError {
    /// ネットワークやデバイス側の一時的な問題かどうか
    ///
    /// `true` の場合、読み取り経路は最後に既知の状態で応答できる。
    pub fn is_transient(&self) -> bool {
        !matches!(self, DeviceError::Request(_))
    }
}

/// リクエスト入力の検証エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request must be JSON")]
    NotJson,

    #[error("Missing {0} parameter")]
    MissingParameter(&'static str),

    #[error("Invalid voltage or current format")]
    InvalidFormat,

    #[error("Invalid relay status. Must be 'on' or 'off'.")]
    InvalidRelayStatus,
}
