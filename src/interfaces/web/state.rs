use crate::SensorAuthPolicy;
use crate::application::use_cases::{
    AuthenticateOperatorUseCase, ControlRelayUseCase, GetDeviceConfigUseCase, GetLiveDataUseCase,
    IngestSensorDataUseCase, UpdateOutputParamsUseCase,
};
use crate::domain::device::{DeviceClient, DeviceVariant, StateStore};
use crate::domain::journal::Journal;
use crate::domain::session::{CredentialVerifier, SessionGuard, SessionRepository};
use std::sync::Arc;
use std::time::Duration;

/// ゲートウェイを組み立てるための依存関係
pub struct GatewayDependencies {
    pub store: Arc<StateStore>,
    pub device: Arc<dyn DeviceClient>,
    pub journal: Arc<dyn Journal>,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub sessions: Arc<dyn SessionRepository>,
    pub variant: DeviceVariant,
    pub sensor_auth: SensorAuthPolicy,
    pub session_ttl: Duration,
}

/// ハンドラ間で共有するアプリケーション状態
pub struct GatewayState {
    pub(crate) guard: SessionGuard,
    pub(crate) authenticate: AuthenticateOperatorUseCase,
    pub(crate) live_data: GetLiveDataUseCase,
    pub(crate) update_output: UpdateOutputParamsUseCase,
    pub(crate) control_relay: ControlRelayUseCase,
    pub(crate) device_config: GetDeviceConfigUseCase,
    pub(crate) sensor_ingest: IngestSensorDataUseCase,
    pub(crate) sensor_auth: SensorAuthPolicy,
    pub(crate) session_ttl: Duration,
    pub(crate) device_endpoint: String,
}

impl GatewayState {
    pub fn new(deps: GatewayDependencies) -> Self {
        let guard = SessionGuard::new(deps.credentials, deps.sessions);
        let device_endpoint = deps.device.endpoint().to_string();

        Self {
            authenticate: AuthenticateOperatorUseCase::new(guard.clone()),
            live_data: GetLiveDataUseCase::new(
                deps.store.clone(),
                deps.device.clone(),
                deps.journal.clone(),
            ),
            update_output: UpdateOutputParamsUseCase::new(
                deps.store.clone(),
                deps.device.clone(),
                deps.journal.clone(),
                deps.variant,
            ),
            control_relay: ControlRelayUseCase::new(
                deps.store.clone(),
                deps.device,
                deps.journal.clone(),
            ),
            device_config: GetDeviceConfigUseCase::new(deps.store.clone()),
            sensor_ingest: IngestSensorDataUseCase::new(deps.store, deps.journal),
            guard,
            sensor_auth: deps.sensor_auth,
            session_ttl: deps.session_ttl,
            device_endpoint,
        }
    }

    pub fn session_guard(&self) -> &SessionGuard {
        &self.guard
    }
}
