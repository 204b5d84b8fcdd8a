//! アプリケーション層
//!
//! ゲートウェイの各操作をユースケースとして組み立てる層

pub mod errors;
pub mod use_cases;

pub use errors::GatewayError;
