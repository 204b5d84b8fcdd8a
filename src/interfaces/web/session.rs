//! セッションクッキーの読み書きと、ログイン必須のエンドポイント用エクストラクタ

use super::error_response::ErrorResponse;
use super::state::GatewayState;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Duration;

pub const SESSION_COOKIE: &str = "bbg_session";

/// リクエストのクッキーからセッショントークンを取り出す
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token)
        .filter(|token| !token.is_empty())
}

pub fn session_cookie(token: &str, ttl: Duration) -> String {
    format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        ttl.as_secs()
    )
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// 302 リダイレクト
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

pub fn found_with_cookie(location: &'static str, cookie: &str) -> Response {
    let mut response = found(location);
    if let Ok(value) = HeaderValue::from_str(cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// ログイン済みのオペレーター
///
/// セッションがない、または期限切れの場合は 401 で拒否する。
#[derive(Debug, Clone, Copy)]
pub struct OperatorSession;

impl FromRequestParts<Arc<GatewayState>> for OperatorSession {
    type Rejection = ErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<GatewayState>,
    ) -> Result<Self, Self::Rejection> {
        if state.guard.is_authenticated(session_token(&parts.headers)) {
            Ok(OperatorSession)
        } else {
            Err(ErrorResponse::unauthorized())
        }
    }
}
