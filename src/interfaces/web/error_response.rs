use crate::application::GatewayError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// `{"error": "..."}` 形式のエラー応答
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip)]
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            status_code: status_code.as_u16(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }
}

impl From<GatewayError> for ErrorResponse {
    fn from(error: GatewayError) -> Self {
        let status_code = match &error {
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Device(_) | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self::new(status_code, error.client_message())
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::device::{DeviceError, ValidationError};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (GatewayError::Unauthorized, 401),
            (GatewayError::Validation(ValidationError::NotJson), 400),
            (GatewayError::Device(DeviceError::Timeout), 500),
            (GatewayError::Internal("boom".to_string()), 500),
        ];
        for (error, status) in cases {
            assert_eq!(ErrorResponse::from(error).status_code, status);
        }
    }

    #[test]
    fn test_body_only_carries_error() {
        let body = serde_json::to_value(ErrorResponse::unauthorized()).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Unauthorized"}));
    }
}
