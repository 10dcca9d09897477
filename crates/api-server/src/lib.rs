//! HTTP API for the todo list service
//!
//! Exposes the todo item repository under `/api/todoItems`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::todo_items::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
