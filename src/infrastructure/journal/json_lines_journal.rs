use crate::domain::journal::{Journal, JournalEntry};
use async_trait::async_trait;
use std::io;
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const COMMAND_FILE: &str = "command.json";
pub const SENSOR_FILE: &str = "sensordata.json";

/// 1行に1つのJSONオブジェクトを追記するジャーナル
///
/// コマンドは `command.json`、センサーデータは `sensordata.json` に書き込む。
pub struct JsonLinesJournal {
    directory: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLinesJournal {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn path_for(&self, entry: &JournalEntry) -> PathBuf {
        let file = if entry.kind.is_command() {
            COMMAND_FILE
        } else {
            SENSOR_FILE
        };
        self.directory.join(file)
    }

    async fn write(&self, entry: &JournalEntry) -> io::Result<PathBuf> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        let path = self.path_for(entry);
        let _guard = self.write_lock.lock().await;
        fs::create_dir_all(&self.directory).await?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(path)
    }
}

#[async_trait]
impl Journal for JsonLinesJournal {
    async fn append(&self, entry: JournalEntry) {
        match self.write(&entry).await {
            Ok(path) => debug!(path = %path.display(), "Journal entry saved"),
            Err(e) => warn!(error = %e, "Error saving journal entry"),
        }
    }
}
