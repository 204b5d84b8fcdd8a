use super::embedded_assets::{render_dashboard, render_login};
use super::models::LoginForm;
use super::session::{clear_session_cookie, found, found_with_cookie, session_cookie, session_token};
use super::state::GatewayState;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn login_page() -> Html<String> {
    render_login(None)
}

pub async fn login(
    State(state): State<Arc<GatewayState>>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => {
            warn!("Login form parsing error: {}", e.body_text());
            LoginForm::default()
        }
    };

    match state.authenticate.execute(&form.username, &form.password) {
        Ok(token) => {
            let cookie = session_cookie(token.as_str(), state.session_ttl);
            found_with_cookie("/", &cookie)
        }
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            render_login(Some("Invalid Username or Password")),
        )
            .into_response(),
    }
}

pub async fn logout(State(state): State<Arc<GatewayState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.guard.logout(token);
    }
    found_with_cookie("/login", &clear_session_cookie())
}

/// Dashboard page rendered with the current device state
pub async fn dashboard(State(state): State<Arc<GatewayState>>, headers: HeaderMap) -> Response {
    if !state.guard.is_authenticated(session_token(&headers)) {
        return found("/login");
    }

    let snapshot = state.live_data.refresh_best_effort().await;
    let initial_state = match serde_json::to_string(&snapshot) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Could not serialize device state");
            "{}".to_string()
        }
    };
    info!("Rendering dashboard");

    render_dashboard(&initial_state, &state.device_endpoint).into_response()
}
