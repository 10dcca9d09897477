//! In-memory store implementation

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::TodoItem;
use super::store::{Predicate, TodoStore};
use crate::{Error, Result};

/// Volatile store keyed by item id
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    items: RwLock<HashMap<Uuid, TodoItem>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_items(items: impl IntoIterator<Item = TodoItem>) -> Self {
        Self {
            items: RwLock::new(items.into_iter().map(|i| (i.id, i)).collect()),
        }
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn insert(&self, item: TodoItem) -> Result<()> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.id) {
            return Err(Error::DuplicateId(item.id));
        }
        items.insert(item.id, item);
        Ok(())
    }

    async fn find_first(&self, predicate: Predicate<'_>) -> Result<Option<TodoItem>> {
        let items = self.items.read().await;
        Ok(items.values().find(|item| predicate(*item)).cloned())
    }

    async fn any(&self, predicate: Predicate<'_>) -> Result<bool> {
        let items = self.items.read().await;
        Ok(items.values().any(|item| predicate(item)))
    }

    async fn list(&self) -> Result<Vec<TodoItem>> {
        let items = self.items.read().await;
        Ok(items.values().cloned().collect())
    }

    async fn update(&self, item: &TodoItem) -> Result<bool> {
        let mut items = self.items.write().await;
        match items.get_mut(&item.id) {
            Some(existing) => {
                existing.description.clone_from(&item.description);
                existing.is_completed = item.is_completed;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let mut items = self.items.write().await;
        Ok(items.remove(&id).is_some())
    }

    async fn clear(&self) -> Result<()> {
        self.items.write().await.clear();
        Ok(())
    }
}
