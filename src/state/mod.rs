//! Build state tracking
//!
//! The driver records the outcome of every build per (recipe, compilation
//! target) pair. Records are informational — nothing reads them to decide
//! whether to rebuild.

mod record;

pub use record::{BuildRecord, BuildStatus};

use crate::config::ConfigManager;
use crate::error::ForgeResult;
use chrono::Utc;
use tracing::{debug, info};

/// Store handling build record CRUD
pub struct RecordStore;

impl RecordStore {
    /// Create a new record store
    pub async fn new() -> ForgeResult<Self> {
        ConfigManager::ensure_state_dirs().await?;
        Ok(Self)
    }

    /// Start tracking a build, replacing any previous record for the pair
    pub async fn start(&self, target: &str, compilation_target: &str) -> ForgeResult<BuildRecord> {
        let record = BuildRecord::new(target.to_string(), compilation_target.to_string());
        record.save().await?;
        info!("Recorded build start: {}", record.key());
        Ok(record)
    }

    /// Mark a build finished with the given status
    pub async fn finish(&self, mut record: BuildRecord, status: BuildStatus) -> ForgeResult<()> {
        record.status = status;
        record.finished_at = Some(Utc::now());
        record.save().await?;
        debug!("Recorded build finish: {} -> {:?}", record.key(), status);
        Ok(())
    }

    /// List all recorded builds, most recent first
    pub async fn list(&self) -> ForgeResult<Vec<BuildRecord>> {
        BuildRecord::list_all().await
    }
}
