//! File-based store implementation
//!
//! Keeps the collection in memory and writes it to a JSON file on disk after
//! every mutation.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use super::memory_store::MemoryTodoStore;
use super::model::TodoItem;
use super::store::{Predicate, TodoStore};
use crate::{Error, Result};

/// Durable store backed by a JSON file
pub struct FileTodoStore {
    /// Path to the JSON file
    path: PathBuf,
    /// In-memory copy of the file contents
    cache: MemoryTodoStore,
    /// Serializes persist-then-apply so snapshots hit the disk in order
    write_lock: Mutex<()>,
}

impl FileTodoStore {
    /// Open the store at `path`.
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if tokio::fs::try_exists(&path).await? {
            let content = tokio::fs::read_to_string(&path).await?;
            let items: Vec<TodoItem> = serde_json::from_str(&content)?;
            debug!(count = items.len(), path = %path.display(), "loaded todo items");
            MemoryTodoStore::from_items(items)
        } else {
            MemoryTodoStore::new()
        };

        Ok(Self {
            path,
            cache,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `items` to disk. The cache is only touched after this succeeds.
    async fn persist(&self, items: &[TodoItem]) -> Result<()> {
        let content = serde_json::to_string_pretty(items)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl TodoStore for FileTodoStore {
    async fn insert(&self, item: TodoItem) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.cache.list().await?;
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(Error::DuplicateId(item.id));
        }
        items.push(item.clone());

        self.persist(&items).await?;
        self.cache.insert(item).await
    }

    async fn find_first(&self, predicate: Predicate<'_>) -> Result<Option<TodoItem>> {
        self.cache.find_first(predicate).await
    }

    async fn any(&self, predicate: Predicate<'_>) -> Result<bool> {
        self.cache.any(predicate).await
    }

    async fn list(&self) -> Result<Vec<TodoItem>> {
        self.cache.list().await
    }

    async fn update(&self, item: &TodoItem) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.cache.list().await?;
        let Some(existing) = items.iter_mut().find(|existing| existing.id == item.id) else {
            return Ok(false);
        };
        existing.description.clone_from(&item.description);
        existing.is_completed = item.is_completed;

        self.persist(&items).await?;
        self.cache.update(item).await
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.cache.list().await?;
        let before = items.len();
        items.retain(|existing| existing.id != id);
        if items.len() == before {
            return Ok(false);
        }

        self.persist(&items).await?;
        self.cache.remove(id).await
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.persist(&[]).await?;
        self.cache.clear().await
    }
}
