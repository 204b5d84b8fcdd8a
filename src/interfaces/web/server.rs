use super::embedded_assets::static_handler;
use super::state::{GatewayDependencies, GatewayState};
use super::{
    control_relay, dashboard, get_esp32_config, get_live_data, health, login, login_page, logout,
    sensor_data_post, update_output_params,
};
use crate::domain::device::{DeviceClient, StateStore};
use crate::domain::journal::{Journal, NullJournal};
use crate::domain::session::{CredentialVerifier, SessionGuard};
use crate::infrastructure::auth::StaticCredentials;
use crate::infrastructure::device::{HttpDeviceConfig, SimulatedDevice};
use crate::infrastructure::journal::JsonLinesJournal;
use crate::infrastructure::session::InMemorySessionStore;
use crate::{GatewayConfig, PasswordSetting};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

pub async fn create_server(config: GatewayConfig) -> anyhow::Result<()> {
    info!("Starting buck-boost gateway web server...");

    // Parse socket address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    let state = Arc::new(build_state(&config)?);
    spawn_session_sweeper(state.session_guard().clone());

    let app = build_router(state);

    // Create TCP listener
    let listener = TcpListener::bind(&addr).await?;

    println!("🌐 Web server started successfully!");
    println!("   URL: http://{addr}");
    println!("   Device: {}", if config.simulate { "simulated" } else { config.device_url.as_str() });
    println!("   Press Ctrl+C to stop");

    // Run the server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

/// 設定から共有状態を組み立てる
pub fn build_state(config: &GatewayConfig) -> anyhow::Result<GatewayState> {
    let device: Arc<dyn DeviceClient> = if config.simulate {
        warn!("Using simulated device instead of {}", config.device_url);
        Arc::new(SimulatedDevice::new(config.variant))
    } else {
        let client = HttpDeviceConfig::new(config.device_url.clone())
            .with_timeout(config.device_timeout)
            .into_client()?;
        Arc::new(client)
    };

    let credentials: Arc<dyn CredentialVerifier> = match &config.password {
        PasswordSetting::Plain(password) => {
            warn!("Operator password is configured in plaintext; prefer a password hash");
            Arc::new(StaticCredentials::plaintext(&config.username, password))
        }
        PasswordSetting::Hashed(encoded) => {
            Arc::new(StaticCredentials::hashed(&config.username, encoded)?)
        }
    };

    let journal: Arc<dyn Journal> = match &config.journal_dir {
        Some(dir) => {
            info!("Journal directory: {}", dir.display());
            Arc::new(JsonLinesJournal::new(dir))
        }
        None => Arc::new(NullJournal),
    };

    Ok(GatewayState::new(GatewayDependencies {
        store: Arc::new(StateStore::new(config.variant)),
        device,
        journal,
        credentials,
        sessions: Arc::new(InMemorySessionStore::new(config.session_ttl)),
        variant: config.variant,
        sensor_auth: config.sensor_auth.clone(),
        session_ttl: config.session_ttl,
    }))
}

/// Create the application router with all endpoints
pub fn build_router(state: Arc<GatewayState>) -> Router {
    Router::new()
        // Pages
        .route("/", get(dashboard))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        // Operator API
        .route("/get_live_data", get(get_live_data))
        .route("/update_output_params", post(update_output_params))
        .route("/control_relay", post(control_relay))
        // Device API
        .route("/get_esp32_config", get(get_esp32_config))
        .route("/sensor_data_post", post(sensor_data_post))
        .route("/api/health", get(health))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(64 * 1024)),
        )
        // Serve embedded static files as fallback
        .fallback(static_handler)
}

fn spawn_session_sweeper(guard: SessionGuard) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let purged = guard.purge_expired();
            if purged > 0 {
                debug!(purged, "Purged expired sessions");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
