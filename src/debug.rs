//! デバッグとログ機能
//!
//! ゲートウェイ全体のログ出力を設定する

use std::fs;
use tracing::{Level, debug, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "buckboost-gateway.log";

/// デバッグ設定
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// ログレベル
    pub log_level: Level,
    /// ファイルログを有効にするか
    pub enable_file_logging: bool,
    /// ログファイルのディレクトリ
    pub log_directory: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            enable_file_logging: true,
            log_directory: "logs".to_string(),
        }
    }
}

impl DebugConfig {
    /// 開発環境用の設定
    pub fn development() -> Self {
        Self {
            log_level: Level::DEBUG,
            enable_file_logging: false,
            log_directory: "logs".to_string(),
        }
    }

    pub fn with_log_directory(mut self, directory: impl Into<String>) -> Self {
        self.log_directory = directory.into();
        self
    }

    /// `RUST_LOG` が未設定の場合に使うフィルター
    pub fn default_filter(&self) -> String {
        let level = self.log_level.as_str().to_ascii_lowercase();
        format!("buckboost_gateway={level},tower_http={level}")
    }
}

/// ログシステムを初期化
pub fn init_logging(
    config: &DebugConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // ログディレクトリを作成
    if config.enable_file_logging {
        fs::create_dir_all(&config.log_directory)?;
    }

    // 環境変数からのフィルター設定
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.default_filter()))?;

    if config.enable_file_logging {
        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, &config.log_directory, LOG_FILE_PREFIX);

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(file_appender)
            .json()
            .try_init()?;
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .pretty()
            .with_target(true)
            .with_thread_ids(true)
            .try_init()?;
    }

    info!("ログシステムが初期化されました");
    debug!("デバッグ設定: {:?}", config);

    Ok(())
}
