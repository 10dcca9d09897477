//! Todo item module
//!
//! Model, store abstraction, store implementations and the repository.

mod file_store;
mod memory_store;
mod model;
mod repository;
mod store;

pub use file_store::FileTodoStore;
pub use memory_store::MemoryTodoStore;
pub use model::*;
pub use repository::TodoItemRepository;
pub use store::{Predicate, TodoStore};
