pub mod authenticate_operator;
pub mod control_relay;
pub mod get_device_config;
pub mod get_live_data;
pub mod ingest_sensor_data;
pub mod run_application;
pub mod update_output_params;

pub use authenticate_operator::AuthenticateOperatorUseCase;
pub use control_relay::ControlRelayUseCase;
pub use get_device_config::GetDeviceConfigUseCase;
pub use get_live_data::GetLiveDataUseCase;
pub use ingest_sensor_data::IngestSensorDataUseCase;
pub use run_application::RunApplicationUseCase;
pub use update_output_params::UpdateOutputParamsUseCase;
