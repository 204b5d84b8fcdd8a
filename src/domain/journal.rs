//! コマンドとセンサーデータの追記専用ジャーナル
//!
//! コアは書き込むだけで読み戻さない。書き込みの失敗でリクエストを失敗させない。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalEntryKind {
    SetOutput,
    ControlRelay,
    Telemetry,
}

impl JournalEntryKind {
    /// オペレーターのコマンドかどうか（センサーデータ以外）
    pub fn is_command(&self) -> bool {
        !matches!(self, JournalEntryKind::Telemetry)
    }
}

/// ジャーナルの1行分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: JournalEntryKind,
    pub payload: Value,
}

impl JournalEntry {
    pub fn new(kind: JournalEntryKind, payload: Value) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            payload,
        }
    }
}

#[async_trait]
pub trait Journal: Send + Sync {
    async fn append(&self, entry: JournalEntry);
}

/// 何も記録しないジャーナル
#[derive(Debug, Default, Clone, Copy)]
pub struct NullJournal;

#[async_trait]
impl Journal for NullJournal {
    async fn append(&self, _entry: JournalEntry) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_serialization_shape() {
        let entry = JournalEntry::new(JournalEntryKind::ControlRelay, json!({"status": "ON"}));
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["type"], json!("control_relay"));
        assert_eq!(value["payload"]["status"], json!("ON"));
        let timestamp = value["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[test]
    fn test_kind_classification() {
        assert!(JournalEntryKind::SetOutput.is_command());
        assert!(JournalEntryKind::ControlRelay.is_command());
        assert!(!JournalEntryKind::Telemetry.is_command());
    }
}
