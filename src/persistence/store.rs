use std::path::{Path, PathBuf};
use crate::error::ProgressError;
use crate::state::learner::LearnerSnapshot;

/// JSON file holding the last saved learner snapshot
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

pub fn default_snapshot_path() -> PathBuf {
    let mut path = crate::config::app_data_dir();
    path.push("data");
    path.push("learner.json");
    path
}

impl SnapshotStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        SnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save snapshot asynchronously
    pub async fn save(&self, snapshot: &LearnerSnapshot) -> Result<(), ProgressError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ProgressError::new(
                    format!("Failed to create directory: {}", e),
                    "io"
                ).with_context(format!("path: {:?}", parent)))?;
        }

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| ProgressError::new(
                format!("Failed to serialize snapshot: {}", e),
                "json_serialize"
            ))?;

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| ProgressError::new(
                format!("Failed to write snapshot: {}", e),
                "io"
            ).with_context(format!("path: {:?}", self.path)))?;

        tracing::debug!(path = ?self.path, session = %snapshot.session_id, "Snapshot saved");
        Ok(())
    }

    /// Load the snapshot; `None` when nothing was saved yet
    pub async fn load(&self) -> Result<Option<LearnerSnapshot>, ProgressError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                serde_json::from_str(&content)
                    .map_err(|e| ProgressError::new(
                        format!("Failed to parse snapshot: {}", e),
                        "json_parse"
                    ).with_context(format!("path: {:?}", self.path)))
                    .map(Some)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(None)
            }
            Err(e) => {
                Err(ProgressError::new(
                    format!("Failed to read snapshot: {}", e),
                    "io"
                ).with_context(format!("path: {:?}", self.path)))
            }
        }
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        SnapshotStore::new(default_snapshot_path())
    }
}
