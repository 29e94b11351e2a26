use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use super::tasks::Task;

/// Errors surfaced by task document backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read task document: {0}")]
    Read(std::io::Error),

    #[error("failed to write task document: {0}")]
    Write(std::io::Error),

    #[error("task document is corrupt: {0}")]
    Corrupt(serde_json::Error),

    #[error("failed to encode task document: {0}")]
    Encode(serde_json::Error),
}

/// Load/save seam over the persisted task collection.
///
/// The whole document is read and rewritten on every mutation, so every write
/// produces a complete, self-consistent document. A backend with real
/// transactional semantics can be swapped in without touching `TaskStore`
/// callers.
#[async_trait]
pub trait TaskDocument: Send + Sync {
    /// Read the full collection. A missing document is an empty collection
    /// and is materialized on disk as a side effect.
    async fn load(&self) -> Result<Vec<Task>, StoreError>;

    /// Persist the full collection, replacing the previous document.
    async fn save(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

/// Production backend: a single pretty-printed JSON file.
pub struct JsonFileDocument {
    path: PathBuf,
}

impl JsonFileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TaskDocument for JsonFileDocument {
    async fn load(&self) -> Result<Vec<Task>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                // First access: persist an empty collection and return it.
                self.save(&[]).await?;
                return Ok(Vec::new());
            }
            Err(err) => return Err(StoreError::Read(err)),
        };

        serde_json::from_slice(&bytes).map_err(StoreError::Corrupt)
    }

    async fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(tasks).map_err(StoreError::Encode)?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(StoreError::Write)
    }
}
