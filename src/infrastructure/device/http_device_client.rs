//! HTTP経由でデバイスと通信するクライアント
//!
//! デバイスのファームウェアは次のエンドポイントを公開している。
//!
//! - `GET /data` : テレメトリのJSON
//! - `POST /set_output_params` : フォーム形式の `voltage`（と `current`）
//! - `POST /control_relay` : フォーム形式の `status`（`on` / `off`）

use crate::domain::device::{DeviceClient, DeviceError, OutputParams, RelayStatus, Telemetry};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// デバイスへの接続設定
#[derive(Debug, Clone)]
pub struct HttpDeviceConfig {
    base_url: String,
    timeout: Duration,
}

impl HttpDeviceConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

    /// `address` はホスト名・IPアドレス、またはスキーム付きのURL
    pub fn new(address: impl Into<String>) -> Self {
        let address = address.into();
        let base_url = if address.starts_with("http://") || address.starts_with("https://") {
            address
        } else {
            format!("http://{address}")
        };

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn into_client(self) -> Result<HttpDeviceClient, DeviceError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| DeviceError::Request(e.to_string()))?;

        Ok(HttpDeviceClient {
            base_url: self.base_url,
            client,
        })
    }
}

#[derive(Debug, Clone)]
pub struct HttpDeviceClient {
    base_url: String,
    client: Client,
}

impl HttpDeviceClient {
    pub fn new(address: impl Into<String>) -> Result<Self, DeviceError> {
        HttpDeviceConfig::new(address).into_client()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn post_form(&self, path: &str, form: &[(&str, String)]) -> Result<(), DeviceError> {
        let url = self.url(path);
        debug!(url = %url, "Sending command to device");

        let response = self
            .client
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(classify)?;

        ensure_ok(response.status())
    }
}

#[async_trait]
impl DeviceClient for HttpDeviceClient {
    async fn fetch_telemetry(&self) -> Result<Telemetry, DeviceError> {
        let url = self.url("data");
        debug!(url = %url, "Fetching telemetry");

        let response = self.client.get(&url).send().await.map_err(classify)?;
        ensure_ok(response.status())?;

        let body = response.bytes().await.map_err(classify)?;
        match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Object(telemetry)) => Ok(telemetry),
            Ok(other) => Err(DeviceError::InvalidBody(format!(
                "expected a JSON object, got {other}"
            ))),
            Err(e) => Err(DeviceError::InvalidBody(e.to_string())),
        }
    }

    async fn send_output_params(&self, params: &OutputParams) -> Result<(), DeviceError> {
        let mut form = vec![("voltage", params.voltage.to_string())];
        if let Some(current) = params.current {
            form.push(("current", current.to_string()));
        }
        self.post_form("set_output_params", &form).await
    }

    async fn send_relay_command(&self, status: RelayStatus) -> Result<(), DeviceError> {
        let form = [("status", status.as_command_token().to_string())];
        self.post_form("control_relay", &form).await
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}

fn ensure_ok(status: StatusCode) -> Result<(), DeviceError> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(DeviceError::BadStatus(status.as_u16()))
    }
}

/// reqwest のエラーをデバイスエラーに分類する
fn classify(error: reqwest::Error) -> DeviceError {
    if error.is_timeout() {
        DeviceError::Timeout
    } else if error.is_connect() {
        DeviceError::Unreachable(error.to_string())
    } else if error.is_builder() {
        DeviceError::Request(error.to_string())
    } else if error.is_decode() || error.is_body() {
        DeviceError::InvalidBody(error.to_string())
    } else {
        DeviceError::Unreachable(error.to_string())
    }
}
