//! Todo item repository
//!
//! The only gateway the API layer uses to read and write todo items. It
//! reports facts (an existence flag, a present or absent item) and leaves the
//! user-facing error decisions to the caller.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

use super::model::{Listing, TodoItem};
use super::store::TodoStore;
use crate::Result;

/// Repository over an injected [`TodoStore`]
#[derive(Clone)]
pub struct TodoItemRepository {
    store: Arc<dyn TodoStore>,
}

impl TodoItemRepository {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Whether an item with exactly this description is currently stored.
    ///
    /// The match is case-sensitive. An empty string only matches an item
    /// whose description is empty, which the API layer never creates.
    pub async fn exists_by_description(&self, description: &str) -> Result<bool> {
        let exists = self
            .store
            .any(&|item: &TodoItem| item.description == description)
            .await?;
        debug!(exists, "checked todo item description");
        Ok(exists)
    }

    /// Look up an item by id; `None` when there is no such item.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<TodoItem>> {
        let item = self.store.find_first(&|item: &TodoItem| item.id == id).await?;
        debug!(%id, found = item.is_some(), "looked up todo item");
        Ok(item)
    }

    /// Every stored item, or an empty list if `cancel` fires first.
    pub async fn list_all(&self, cancel: &CancellationToken) -> Result<Vec<TodoItem>> {
        Ok(self.list_all_checked(cancel).await?.items)
    }

    /// Like [`list_all`](Self::list_all) but reports whether the read was
    /// abandoned, so a cancelled read can be told apart from an empty store.
    pub async fn list_all_checked(&self, cancel: &CancellationToken) -> Result<Listing> {
        if cancel.is_cancelled() {
            warn!("todo item listing cancelled before reading the store");
            return Ok(Listing::cancelled());
        }

        // Cancellation wins when both are ready.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("todo item listing cancelled during the store read");
                Ok(Listing::cancelled())
            }
            items = self.store.list() => {
                let items = items?;
                debug!(count = items.len(), "listed todo items");
                Ok(Listing::completed(items))
            }
        }
    }

    /// Store a new item. Callers check the description first.
    pub async fn insert(&self, item: TodoItem) -> Result<()> {
        let id = item.id;
        self.store.insert(item).await?;
        debug!(%id, "inserted todo item");
        Ok(())
    }

    /// Overwrite the description and completion flag of `item.id`.
    ///
    /// Does nothing when the id is unknown; callers that need to tell the
    /// difference check with [`get_by_id`](Self::get_by_id) first.
    pub async fn update(&self, item: TodoItem) -> Result<()> {
        let applied = self.store.update(&item).await?;
        if applied {
            debug!(id = %item.id, "updated todo item");
        } else {
            debug!(id = %item.id, "update skipped, no such todo item");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::MemoryTodoStore;
    use crate::Error;
    use async_trait::async_trait;
    use std::time::Duration;

    use crate::todo::store::Predicate;

    struct Seeded {
        repo: TodoItemRepository,
        store: Arc<MemoryTodoStore>,
        first: TodoItem,
        second: TodoItem,
        third: TodoItem,
    }

    /// Three items, the first and third completed. Each description is the
    /// item's own id.
    async fn seeded() -> Seeded {
        let first = described_by_id(TodoItem::new("")).with_completed(true);
        let second = described_by_id(TodoItem::new(""));
        let third = described_by_id(TodoItem::new("")).with_completed(true);

        let store = Arc::new(MemoryTodoStore::new());
        for item in [&first, &second, &third] {
            store.insert(item.clone()).await.unwrap();
        }

        Seeded {
            repo: TodoItemRepository::new(store.clone()),
            store,
            first,
            second,
            third,
        }
    }

    fn described_by_id(mut item: TodoItem) -> TodoItem {
        item.description = item.id.to_string();
        item
    }

    #[tokio::test]
    async fn test_exists_by_description() {
        let s = seeded().await;

        assert!(s.repo.exists_by_description(&s.first.id.to_string()).await.unwrap());
        assert!(s.repo.exists_by_description(&s.second.id.to_string()).await.unwrap());
        assert!(!s.repo.exists_by_description("Not exists").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_by_description_is_case_sensitive() {
        let repo = TodoItemRepository::new(Arc::new(MemoryTodoStore::new()));
        repo.insert(TodoItem::new("Buy Milk")).await.unwrap();

        assert!(repo.exists_by_description("Buy Milk").await.unwrap());
        assert!(!repo.exists_by_description("buy milk").await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_by_description_empty_inputs() {
        let repo = TodoItemRepository::new(Arc::new(MemoryTodoStore::new()));
        assert!(!repo.exists_by_description("").await.unwrap());
        assert!(!repo.exists_by_description("anything").await.unwrap());

        let s = seeded().await;
        assert!(!s.repo.exists_by_description("").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_by_id_when_item_exists() {
        let s = seeded().await;

        let item = s.repo.get_by_id(s.first.id).await.unwrap().unwrap();
        assert_eq!(item.id, s.first.id);
        assert!(item.is_completed);
    }

    #[tokio::test]
    async fn test_get_by_id_when_item_does_not_exist() {
        let s = seeded().await;
        assert!(s.repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_returns_every_item() {
        let s = seeded().await;

        let mut items = s.repo.list_all(&CancellationToken::new()).await.unwrap();
        items.sort_by_key(|i| i.id);

        let mut expected = vec![s.first, s.second, s.third];
        expected.sort_by_key(|i| i.id);
        assert_eq!(items, expected);
    }

    #[tokio::test]
    async fn test_list_all_on_empty_store() {
        let repo = TodoItemRepository::new(Arc::new(MemoryTodoStore::new()));

        let listing = repo.list_all_checked(&CancellationToken::new()).await.unwrap();
        assert!(listing.items.is_empty());
        assert!(!listing.cancelled);
    }

    #[tokio::test]
    async fn test_list_all_with_cancelled_token_is_empty() {
        let s = seeded().await;
        let cancel = CancellationToken::new();
        cancel.cancel();

        let items = s.repo.list_all(&cancel).await.unwrap();
        assert!(items.is_empty());

        let listing = s.repo.list_all_checked(&cancel).await.unwrap();
        assert!(listing.cancelled);
        assert!(listing.items.is_empty());
    }

    /// Store whose `list` takes a while, so cancellation can land mid-read.
    struct SlowStore(MemoryTodoStore);

    #[async_trait]
    impl TodoStore for SlowStore {
        async fn insert(&self, item: TodoItem) -> Result<()> {
            self.0.insert(item).await
        }
        async fn find_first(&self, predicate: Predicate<'_>) -> Result<Option<TodoItem>> {
            self.0.find_first(predicate).await
        }
        async fn any(&self, predicate: Predicate<'_>) -> Result<bool> {
            self.0.any(predicate).await
        }
        async fn list(&self) -> Result<Vec<TodoItem>> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            self.0.list().await
        }
        async fn update(&self, item: &TodoItem) -> Result<bool> {
            self.0.update(item).await
        }
        async fn remove(&self, id: Uuid) -> Result<bool> {
            self.0.remove(id).await
        }
        async fn clear(&self) -> Result<()> {
            self.0.clear().await
        }
    }

    #[tokio::test]
    async fn test_list_all_cancelled_during_read_is_empty() {
        let store = SlowStore(MemoryTodoStore::from_items([TodoItem::new("slow")]));
        let repo = TodoItemRepository::new(Arc::new(store));
        let cancel = CancellationToken::new();

        let canceller = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                cancel.cancel();
            })
        };

        let listing = repo.list_all_checked(&cancel).await.unwrap();
        canceller.await.unwrap();

        assert!(listing.cancelled);
        assert!(listing.items.is_empty());
    }

    /// Store that fails every call.
    struct BrokenStore;

    #[async_trait]
    impl TodoStore for BrokenStore {
        async fn insert(&self, _item: TodoItem) -> Result<()> {
            Err(Error::Storage("offline".into()))
        }
        async fn find_first(&self, _predicate: Predicate<'_>) -> Result<Option<TodoItem>> {
            Err(Error::Storage("offline".into()))
        }
        async fn any(&self, _predicate: Predicate<'_>) -> Result<bool> {
            Err(Error::Storage("offline".into()))
        }
        async fn list(&self) -> Result<Vec<TodoItem>> {
            Err(Error::Storage("offline".into()))
        }
        async fn update(&self, _item: &TodoItem) -> Result<bool> {
            Err(Error::Storage("offline".into()))
        }
        async fn remove(&self, _id: Uuid) -> Result<bool> {
            Err(Error::Storage("offline".into()))
        }
        async fn clear(&self) -> Result<()> {
            Err(Error::Storage("offline".into()))
        }
    }

    #[tokio::test]
    async fn test_store_faults_propagate() {
        let repo = TodoItemRepository::new(Arc::new(BrokenStore));

        assert!(matches!(
            repo.exists_by_description("x").await,
            Err(Error::Storage(_))
        ));
        assert!(matches!(repo.get_by_id(Uuid::new_v4()).await, Err(Error::Storage(_))));
        assert!(matches!(
            repo.list_all(&CancellationToken::new()).await,
            Err(Error::Storage(_))
        ));
        assert!(matches!(
            repo.update(TodoItem::new("x")).await,
            Err(Error::Storage(_))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_listing_skips_a_broken_store() {
        let repo = TodoItemRepository::new(Arc::new(BrokenStore));
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert!(repo.list_all(&cancel).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_existing_item() {
        let s = seeded().await;

        let mut item = s.repo.get_by_id(s.first.id).await.unwrap().unwrap();
        item.description = "Updated".to_string();
        item.is_completed = false;
        s.repo.update(item).await.unwrap();

        let updated = s.repo.get_by_id(s.first.id).await.unwrap().unwrap();
        assert_eq!(updated.description, "Updated");
        assert!(!updated.is_completed);
    }

    #[tokio::test]
    async fn test_update_unknown_item_leaves_store_unchanged() {
        let s = seeded().await;
        let before = s.store.list().await.unwrap().len();

        s.repo.update(TodoItem::new("Ghost")).await.unwrap();

        assert_eq!(s.store.list().await.unwrap().len(), before);
        assert!(!s.repo.exists_by_description("Ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_description_is_only_reported() {
        let repo = TodoItemRepository::new(Arc::new(MemoryTodoStore::new()));
        repo.insert(TodoItem::new("X")).await.unwrap();

        // The repository states the fact; refusing the insert is up to the caller.
        assert!(repo.exists_by_description("X").await.unwrap());
        repo.insert(TodoItem::new("X")).await.unwrap();
        assert_eq!(repo.list_all(&CancellationToken::new()).await.unwrap().len(), 2);
    }
}
