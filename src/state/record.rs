//! Build record persistence

use crate::config::ConfigManager;
use crate::error::{ForgeError, ForgeResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

/// Outcome of a recorded build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Running,
    Succeeded,
    Failed,
}

/// One build of one recipe for one compilation target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRecord {
    /// Unique run ID
    pub id: Uuid,

    /// Recipe target name
    pub target: String,

    /// Compilation target triple
    pub compilation_target: String,

    /// Current status
    pub status: BuildStatus,

    /// When the build started
    pub started_at: DateTime<Utc>,

    /// When the build finished (unset while running)
    pub finished_at: Option<DateTime<Utc>>,
}

impl BuildRecord {
    /// Create a new running record
    pub fn new(target: String, compilation_target: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
            compilation_target,
            status: BuildStatus::Running,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Key identifying the (recipe, compilation target) pair
    pub fn key(&self) -> String {
        format!("{}-{}", self.target, self.compilation_target)
    }

    /// Get record file path
    pub fn file_path(&self) -> PathBuf {
        ConfigManager::records_dir().join(format!("{}.json", self.key()))
    }

    /// Load the record for a (recipe, compilation target) pair
    pub async fn load(key: &str) -> ForgeResult<Option<Self>> {
        let path = ConfigManager::records_dir().join(format!("{}.json", key));

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| ForgeError::io(format!("reading build record {}", path.display()), e))?;

        let record: BuildRecord = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    /// Save the record
    pub async fn save(&self) -> ForgeResult<()> {
        let path = self.file_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ForgeError::io("creating build records directory", e))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)
            .await
            .map_err(|e| ForgeError::io(format!("writing build record {}", path.display()), e))?;

        Ok(())
    }

    /// List all recorded builds
    pub async fn list_all() -> ForgeResult<Vec<Self>> {
        let dir = ConfigManager::records_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&dir)
            .await
            .map_err(|e| ForgeError::io(format!("reading {}", dir.display()), e))?;

        let mut records = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ForgeError::io("iterating build records", e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| ForgeError::io(format!("reading {}", path.display()), e))?;
            match serde_json::from_str::<BuildRecord>(&content) {
                Ok(record) => records.push(record),
                // Skip records written by other versions rather than
                // failing the whole listing
                Err(_) => continue,
            }
        }

        records.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(records)
    }
}
