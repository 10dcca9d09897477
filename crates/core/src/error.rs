//! Error types for the core library
//!
//! Everything here is an infrastructure fault. Business outcomes such as
//! "not found" or "duplicate description" are plain return values.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Todo item with id {0} already exists in the store")]
    DuplicateId(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}
