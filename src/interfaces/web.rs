//! Web インターフェース
//!
//! ブラウザ向けのログイン・ダッシュボードページと、デバイス状態を扱うJSON APIを提供します。
//! デバイス自身が呼び出す設定取得とテレメトリ送信のエンドポイントも含みます。

mod embedded_assets;
mod error_response;
mod handlers;
mod models;
mod page_handlers;
mod session;

pub mod server;
pub mod state;

// 内部使用のため、必要な型のみを再エクスポート
pub(crate) use handlers::{
    control_relay, get_esp32_config, get_live_data, health, sensor_data_post,
    update_output_params,
};
pub(crate) use page_handlers::{dashboard, login, login_page, logout};
