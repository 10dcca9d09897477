//! Core library for the todo list service
//!
//! This crate contains the data-access side of the service:
//! - The todo item model
//! - The store abstraction and its in-memory and file-backed implementations
//! - The repository the API layer talks to

pub mod error;
pub mod todo;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
