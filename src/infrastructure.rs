//! インフラストラクチャ層
//!
//! デバイスとのHTTP通信、セッションの保管、認証情報、ジャーナルの実装

pub mod auth;
pub mod device;
pub mod journal;
pub mod session;
