//! ドメイン層
//!
//! デバイス状態、セッション、ジャーナルのモデル

pub mod device;
pub mod journal;
pub mod session;
