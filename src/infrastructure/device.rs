pub mod http_device_client;
pub mod simulated_device;

pub use http_device_client::{HttpDeviceClient, HttpDeviceConfig};
pub use simulated_device::SimulatedDevice;
