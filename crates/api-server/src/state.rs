//! Application state

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use todo_core::todo::{FileTodoStore, MemoryTodoStore, TodoItemRepository, TodoStore};

use crate::config::{AppConfig, StoreKind};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    repository: TodoItemRepository,
    store_kind: StoreKind,
    shutdown: CancellationToken,
}

impl AppState {
    /// Open the store selected by `config` and wire the repository to it
    pub async fn new(config: &AppConfig) -> todo_core::Result<Self> {
        let store: Arc<dyn TodoStore> = match config.store {
            StoreKind::Memory => Arc::new(MemoryTodoStore::new()),
            StoreKind::File => Arc::new(FileTodoStore::open(config.items_path()).await?),
        };
        Ok(Self::with_store(store, config.store))
    }

    /// Build state around an already constructed store
    pub fn with_store(store: Arc<dyn TodoStore>, store_kind: StoreKind) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                repository: TodoItemRepository::new(store),
                store_kind,
                shutdown: CancellationToken::new(),
            }),
        }
    }

    pub fn repository(&self) -> &TodoItemRepository {
        &self.inner.repository
    }

    pub fn store_kind(&self) -> StoreKind {
        self.inner.store_kind
    }

    /// Root token, cancelled when the server begins shutting down
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }
}
