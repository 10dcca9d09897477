//! Store trait
//!
//! The capability set the repository is written against: record insert,
//! predicate lookup, full enumeration and in-place update by id.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::TodoItem;
use crate::Result;

/// Predicate used for lookups by field match.
pub type Predicate<'a> = &'a (dyn Fn(&TodoItem) -> bool + Send + Sync);

/// Persistence interface for the todo item collection
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Insert a new record. Fails with `Error::DuplicateId` if the id is taken.
    async fn insert(&self, item: TodoItem) -> Result<()>;

    /// First record matching the predicate
    async fn find_first(&self, predicate: Predicate<'_>) -> Result<Option<TodoItem>>;

    /// Whether any record matches the predicate
    async fn any(&self, predicate: Predicate<'_>) -> Result<bool>;

    /// Snapshot of every record
    async fn list(&self) -> Result<Vec<TodoItem>>;

    /// Overwrite the mutable fields of the record with `item.id`.
    ///
    /// Returns `false` and changes nothing when no such record exists.
    async fn update(&self, item: &TodoItem) -> Result<bool>;

    /// Remove a record by id
    async fn remove(&self, id: Uuid) -> Result<bool>;

    /// Remove every record
    async fn clear(&self) -> Result<()>;
}
