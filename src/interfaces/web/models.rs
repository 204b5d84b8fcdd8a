use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `/sensor_data_post` の応答
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorAck {
    pub status: String,
    pub message: String,
}

impl SensorAck {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
            message: "Data received".to_string(),
        }
    }

    pub fn invalid_json() -> Self {
        Self {
            status: "error".to_string(),
            message: "Invalid JSON".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub build: String,
}
