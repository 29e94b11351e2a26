use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::document::{StoreError, TaskDocument};

/// A titled, optionally described, completable unit of work.
///
/// `id` uniquely identifies a task within the store; `created_at` is immutable
/// and `updated_at` stays absent until the first modification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields a caller may change on an existing task. `None` means "leave as is".
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Durable CRUD over the task collection with whole-document semantics.
///
/// Every operation re-reads the full document, so the store is always
/// consistent with the last successful write. All operations hold `lock` for
/// their entire read-modify-write cycle; two concurrent mutating calls are
/// serialized instead of overwriting each other's result.
pub struct TaskStore {
    document: Box<dyn TaskDocument>,
    lock: Mutex<()>,
}

impl TaskStore {
    pub fn new(document: Box<dyn TaskDocument>) -> Self {
        Self {
            document,
            lock: Mutex::new(()),
        }
    }

    /// Load the entire persisted collection in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        let _guard = self.lock.lock().await;
        self.document.load().await
    }

    /// Linear scan for the first record whose id matches.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Task>, StoreError> {
        let _guard = self.lock.lock().await;
        let tasks = self.document.load().await?;
        Ok(tasks.into_iter().find(|task| task.id == id))
    }

    pub async fn create(&self, title: String, description: String) -> Result<Task, StoreError> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.document.load().await?;

        let task = Task {
            id: next_id(&tasks),
            title,
            description,
            completed: false,
            created_at: Utc::now(),
            updated_at: None,
        };

        tasks.push(task.clone());
        self.document.save(&tasks).await?;

        Ok(task)
    }

    /// Merge the supplied fields over the existing record. `id` and
    /// `created_at` are preserved; `updated_at` is stamped. Returns `None`
    /// without mutation when the id is absent.
    pub async fn update(&self, id: i64, patch: TaskPatch) -> Result<Option<Task>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.document.load().await?;

        let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        task.updated_at = Some(Utc::now());

        let updated = task.clone();
        self.document.save(&tasks).await?;

        Ok(Some(updated))
    }

    /// Returns `false` without mutation when the id is absent.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut tasks = self.document.load().await?;

        let Some(index) = tasks.iter().position(|task| task.id == id) else {
            return Ok(false);
        };

        tasks.remove(index);
        self.document.save(&tasks).await?;

        Ok(true)
    }
}

/// Millisecond-timestamp-derived id, forced monotonic under the store lock so
/// concurrent creates within one clock tick cannot collide.
fn next_id(tasks: &[Task]) -> i64 {
    let now = Utc::now().timestamp_millis();
    match tasks.iter().map(|task| task.id).max() {
        Some(max) => now.max(max + 1),
        None => now,
    }
}
