use super::error_response::ErrorResponse;
use super::models::{HealthResponse, MessageResponse, SensorAck};
use super::session::{OperatorSession, session_token};
use super::state::GatewayState;
use crate::SensorAuthPolicy;
use crate::application::GatewayError;
use crate::domain::device::{DeviceConfig, DeviceState, ValidationError};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

pub const DEVICE_KEY_HEADER: &str = "x-device-key";

/// Get the latest device state (falls back to the cached state)
pub async fn get_live_data(
    _operator: OperatorSession,
    State(state): State<Arc<GatewayState>>,
) -> Result<Json<DeviceState>, ErrorResponse> {
    let snapshot = state.live_data.execute().await?;
    Ok(Json(snapshot))
}

/// Send new output parameters to the device
pub async fn update_output_params(
    _operator: OperatorSession,
    State(state): State<Arc<GatewayState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ErrorResponse> {
    let Json(body) = body.map_err(reject_body)?;
    state.update_output.execute(&body).await?;
    Ok(Json(MessageResponse::new("Parameters updated successfully")))
}

/// Switch the relay on or off
pub async fn control_relay(
    _operator: OperatorSession,
    State(state): State<Arc<GatewayState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ErrorResponse> {
    let Json(body) = body.map_err(reject_body)?;
    let status = state.control_relay.execute(&body).await?;
    Ok(Json(MessageResponse::new(format!("Relay set to {status}"))))
}

/// Configuration fetched by the device when it boots
pub async fn get_esp32_config(State(state): State<Arc<GatewayState>>) -> Json<DeviceConfig> {
    Json(state.device_config.execute())
}

/// Telemetry pushed by the device
pub async fn sensor_data_post(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    if !sensor_caller_allowed(&state, &headers) {
        warn!("Rejected sensor data from unauthenticated caller");
        return ErrorResponse::unauthorized().into_response();
    }

    let Ok(Json(body)) = body else {
        return (StatusCode::BAD_REQUEST, Json(SensorAck::invalid_json())).into_response();
    };

    match state.sensor_ingest.execute(body).await {
        Ok(_) => Json(SensorAck::success()).into_response(),
        Err(GatewayError::Validation(_)) => {
            (StatusCode::BAD_REQUEST, Json(SensorAck::invalid_json())).into_response()
        }
        Err(e) => ErrorResponse::from(e).into_response(),
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: env!("BUILD_TIMESTAMP").to_string(),
    })
}

// Helper functions

fn reject_body(rejection: JsonRejection) -> ErrorResponse {
    warn!("JSON parsing error: {}", rejection.body_text());
    GatewayError::from(ValidationError::NotJson).into()
}

fn sensor_caller_allowed(state: &GatewayState, headers: &HeaderMap) -> bool {
    match &state.sensor_auth {
        SensorAuthPolicy::Open => true,
        SensorAuthPolicy::Enforced { device_key } => {
            let key_ok = device_key.as_deref().is_some_and(|expected| {
                headers
                    .get(DEVICE_KEY_HEADER)
                    .and_then(|value| value.to_str().ok())
                    == Some(expected)
            });
            key_ok || state.guard.is_authenticated(session_token(headers))
        }
    }
}
