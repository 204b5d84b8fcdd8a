//! ルーター全体を模擬デバイスで動かす結合テスト

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use buckboost_gateway::SensorAuthPolicy;
use buckboost_gateway::domain::device::{
    DeviceError, DeviceVariant, RelayStatus, StateStore,
};
use buckboost_gateway::domain::journal::NullJournal;
use buckboost_gateway::infrastructure::auth::StaticCredentials;
use buckboost_gateway::infrastructure::device::SimulatedDevice;
use buckboost_gateway::infrastructure::session::InMemorySessionStore;
use buckboost_gateway::interfaces::web::server::build_router;
use buckboost_gateway::interfaces::web::state::{GatewayDependencies, GatewayState};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

struct TestGateway {
    router: Router,
    device: Arc<SimulatedDevice>,
    store: Arc<StateStore>,
}

impl TestGateway {
    fn new() -> Self {
        Self::with(DeviceVariant::VOLTAGE_CURRENT, SensorAuthPolicy::Open)
    }

    fn with(variant: DeviceVariant, sensor_auth: SensorAuthPolicy) -> Self {
        let device = Arc::new(SimulatedDevice::new(variant));
        let store = Arc::new(StateStore::new(variant));
        let ttl = Duration::from_secs(600);

        let state = GatewayState::new(GatewayDependencies {
            store: store.clone(),
            device: device.clone(),
            journal: Arc::new(NullJournal),
            credentials: Arc::new(StaticCredentials::plaintext("user", "password")),
            sessions: Arc::new(InMemorySessionStore::new(ttl)),
            variant,
            sensor_auth,
            session_ttl: ttl,
        });

        Self {
            router: build_router(Arc::new(state)),
            device,
            store,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// ログインしてセッションクッキー（`name=value`）を返す
    async fn login(&self) -> String {
        let response = self
            .send(
                Request::post("/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("username=user&password=password"))
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status(), StatusCode::FOUND);

        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_operator_endpoints_require_login() {
    let gateway = TestGateway::new();
    let before = gateway.store.get();

    let response = gateway.send(get("/get_live_data", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await, json!({"error": "Unauthorized"}));

    let response = gateway
        .send(post_json("/update_output_params", None, json!({"voltage": 12, "current": 300})))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = gateway
        .send(post_json(
            "/control_relay",
            Some("bbg_session=forged"),
            json!({"status": "on"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(gateway.device.fetch_count(), 0);
    assert_eq!(gateway.device.command_count(), 0);
    assert_eq!(gateway.store.get(), before);
}

#[tokio::test]
async fn test_dashboard_redirects_until_logged_in() {
    let gateway = TestGateway::new();

    let response = gateway.send(get("/", None)).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/login");

    let cookie = gateway.login().await;
    let response = gateway.send(get("/", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = text_body(response).await;
    assert!(page.contains("initial-state"));
    assert!(page.contains("simulated"));
}

#[tokio::test]
async fn test_failed_login_rerenders_form() {
    let gateway = TestGateway::new();

    let response = gateway
        .send(
            Request::post("/login")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("username=user&password=wrong"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert!(text_body(response).await.contains("Invalid Username or Password"));
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let gateway = TestGateway::new();
    let cookie = gateway.login().await;

    let response = gateway.send(get("/logout", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/login");
    let cleared = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let response = gateway.send(get("/get_live_data", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_output_params_updates_targets() {
    let gateway = TestGateway::new();
    let cookie = gateway.login().await;

    let response = gateway
        .send(post_json(
            "/update_output_params",
            Some(&cookie),
            json!({"voltage": 12.5, "current": "300"}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"message": "Parameters updated successfully"})
    );

    let state = gateway.store.get();
    assert_eq!(state.target_voltage, 12.5);
    assert_eq!(state.target_current, Some(300.0));

    let config = json_body(gateway.send(get("/get_esp32_config", None)).await).await;
    assert_eq!(config["target_voltage"], json!(12.5));
    assert_eq!(config["target_current"], json!(300.0));
}

#[tokio::test]
async fn test_invalid_output_params_never_reach_device() {
    let gateway = TestGateway::new();
    let cookie = gateway.login().await;

    let cases = [
        (json!({"voltage": "notanumber"}), "Invalid voltage or current format"),
        (json!({"current": 100}), "Missing voltage parameter"),
        (json!({"voltage": 5}), "Missing current parameter"),
    ];

    for (body, message) in cases {
        let response = gateway
            .send(post_json("/update_output_params", Some(&cookie), body))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({"error": message}));
    }

    let response = gateway
        .send(
            Request::post("/update_output_params")
                .header(header::COOKIE, &cookie)
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("voltage=5"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({"error": "Request must be JSON"}));

    assert_eq!(gateway.device.command_count(), 0);
    assert_eq!(gateway.store.get().target_voltage, 7.0);
}

#[tokio::test]
async fn test_voltage_only_variant_ignores_current() {
    let gateway = TestGateway::with(DeviceVariant::VOLTAGE_ONLY, SensorAuthPolicy::Open);
    let cookie = gateway.login().await;

    let response = gateway
        .send(post_json("/update_output_params", Some(&cookie), json!({"voltage": 9})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let config = json_body(gateway.send(get("/get_esp32_config", None)).await).await;
    assert_eq!(config["target_voltage"], json!(9.0));
    assert!(config.get("target_current").is_none());
}

#[tokio::test]
async fn test_relay_command_is_case_insensitive() {
    let gateway = TestGateway::new();
    let cookie = gateway.login().await;

    let response = gateway
        .send(post_json("/control_relay", Some(&cookie), json!({"status": "On"})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"message": "Relay set to ON"}));
    assert_eq!(gateway.device.relay(), RelayStatus::On);

    let live = json_body(gateway.send(get("/get_live_data", Some(&cookie))).await).await;
    assert_eq!(live["relay_status"], json!("ON"));
    assert_eq!(live["load_voltage"], json!(7.0));
}

#[tokio::test]
async fn test_invalid_relay_status() {
    let gateway = TestGateway::new();
    let cookie = gateway.login().await;

    for body in [json!({"status": "maybe"}), json!({}), json!({"status": 1})] {
        let response = gateway
            .send(post_json("/control_relay", Some(&cookie), body))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({"error": "Invalid relay status. Must be 'on' or 'off'."})
        );
    }
    assert_eq!(gateway.device.command_count(), 0);
}

#[tokio::test]
async fn test_live_data_falls_back_to_cache() {
    let gateway = TestGateway::new();
    let cookie = gateway.login().await;

    gateway.device.set_relay(RelayStatus::On);
    let fresh = json_body(gateway.send(get("/get_live_data", Some(&cookie))).await).await;
    assert_eq!(fresh["relay_status"], json!("ON"));

    for error in [
        DeviceError::Timeout,
        DeviceError::Unreachable("connection refused".to_string()),
        DeviceError::BadStatus(503),
    ] {
        gateway.device.fail_with(Some(error));
        let response = gateway.send(get("/get_live_data", Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, fresh);
    }
    assert_eq!(gateway.device.fetch_count(), 4);
}

#[tokio::test]
async fn test_device_failures_on_commands() {
    let gateway = TestGateway::new();
    let cookie = gateway.login().await;

    let cases = [
        (
            DeviceError::Unreachable("refused".to_string()),
            "Could not connect to device. Check address and network.",
        ),
        (DeviceError::Timeout, "Timeout connecting to device."),
        (DeviceError::BadStatus(404), "Device returned status: 404"),
    ];

    for (error, message) in cases {
        gateway.device.fail_with(Some(error));
        let response = gateway
            .send(post_json("/control_relay", Some(&cookie), json!({"status": "on"})))
            .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({"error": message}));
    }

    assert_eq!(gateway.store.get().relay_status, RelayStatus::Off);
}

#[tokio::test]
async fn test_sensor_data_post_merges_telemetry() {
    let gateway = TestGateway::new();

    let response = gateway
        .send(post_json(
            "/sensor_data_post",
            None,
            json!({"bus_voltage": 11.9, "target_voltage": 9.5, "temperature": 31}),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"status": "success", "message": "Data received"})
    );

    let state = gateway.store.get();
    assert_eq!(state.bus_voltage, 11.9);
    assert_eq!(state.extra.get("temperature"), Some(&json!(31)));

    let config = json_body(gateway.send(get("/get_esp32_config", None)).await).await;
    assert_eq!(config["target_voltage"], json!(9.5));
    assert_eq!(config["relay_status_default"], json!("OFF"));
}

#[tokio::test]
async fn test_sensor_data_post_rejects_invalid_json() {
    let gateway = TestGateway::new();

    let response = gateway
        .send(
            Request::post("/sensor_data_post")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"status": "error", "message": "Invalid JSON"})
    );

    let response = gateway
        .send(post_json("/sensor_data_post", None, json!([1, 2, 3])))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_enforced_sensor_auth() {
    let gateway = TestGateway::with(
        DeviceVariant::VOLTAGE_CURRENT,
        SensorAuthPolicy::Enforced {
            device_key: Some("secret-key".to_string()),
        },
    );
    let body = json!({"bus_voltage": 3.3});

    let response = gateway
        .send(post_json("/sensor_data_post", None, body.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(gateway.store.get().bus_voltage, 0.0);

    let response = gateway
        .send(
            Request::post("/sensor_data_post")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-device-key", "secret-key")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = gateway.login().await;
    let response = gateway
        .send(post_json("/sensor_data_post", Some(&cookie), json!({"bus_voltage": 4.2})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(gateway.store.get().bus_voltage, 4.2);
}

#[tokio::test]
async fn test_health_and_static_assets() {
    let gateway = TestGateway::new();

    let health = json_body(gateway.send(get("/api/health", None)).await).await;
    assert_eq!(health["status"], json!("ok"));
    assert_eq!(health["version"], json!(env!("CARGO_PKG_VERSION")));

    let response = gateway.send(get("/css/style.css", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/css")
    );

    let response = gateway.send(get("/dashboard.html", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
