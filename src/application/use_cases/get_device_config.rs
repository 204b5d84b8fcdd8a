use crate::domain::device::{DeviceConfig, StateStore};
use std::sync::Arc;

/// デバイスが起動時に取得する目標値とリレーの既定状態
#[derive(Clone)]
pub struct GetDeviceConfigUseCase {
    store: Arc<StateStore>,
}

impl GetDeviceConfigUseCase {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    pub fn execute(&self) -> DeviceConfig {
        self.store.device_config()
    }
}
