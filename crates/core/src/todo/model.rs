//! Todo item model definitions

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: Uuid,
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl TodoItem {
    /// Create a new, not yet completed item with a fresh random id
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            is_completed: false,
        }
    }

    /// Set the id
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Set the completion flag
    pub fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }
}

/// Result of a cancellation-aware read.
///
/// `items` is empty whenever `cancelled` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub items: Vec<TodoItem>,
    pub cancelled: bool,
}

impl Listing {
    pub(crate) fn completed(items: Vec<TodoItem>) -> Self {
        Self {
            items,
            cancelled: false,
        }
    }

    pub(crate) fn cancelled() -> Self {
        Self {
            items: Vec::new(),
            cancelled: true,
        }
    }
}
