//! Todo item API endpoints
//!
//! Thin layer over the repository: it validates request shape, consults the
//! repository and turns its answers into status codes.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use todo_core::todo::TodoItem;

use crate::error::{ApiError, DESCRIPTION_REQUIRED};
use crate::state::AppState;

// ============================================================================
// Request types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoItemRequest {
    #[serde(alias = "Description")]
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoItemRequest {
    #[serde(alias = "Id")]
    pub id: Uuid,
    #[serde(alias = "Description")]
    pub description: String,
    #[serde(default, alias = "IsCompleted")]
    pub is_completed: bool,
}

fn require_description(description: &str) -> Result<(), ApiError> {
    if description.trim().is_empty() {
        return Err(ApiError::InvalidInput(DESCRIPTION_REQUIRED.to_string()));
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/todoItems - List all todo items
async fn list_todo_items(State(state): State<AppState>) -> Result<Json<Vec<TodoItem>>, ApiError> {
    // Cancelled on server shutdown, or when this future is dropped because
    // the client went away.
    let cancel = state.shutdown_token().child_token();
    let _abort_on_drop = cancel.clone().drop_guard();

    let items = state.repository().list_all(&cancel).await?;
    Ok(Json(items))
}

/// GET /api/todoItems/{id} - Get a single todo item
async fn get_todo_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TodoItem>, ApiError> {
    match state.repository().get_by_id(id).await? {
        Some(item) => Ok(Json(item)),
        None => Err(ApiError::NotFound(id)),
    }
}

/// POST /api/todoItems - Create a todo item, responding with its id
async fn create_todo_item(
    State(state): State<AppState>,
    Json(req): Json<CreateTodoItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_description(&req.description)?;

    let repository = state.repository();
    if repository.exists_by_description(&req.description).await? {
        return Err(ApiError::Conflict);
    }

    // Check and insert are separate store calls; concurrent creates with the
    // same description can both pass the check.
    let item = TodoItem::new(req.description);
    let id = item.id;
    repository.insert(item).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/todoItems/{}", id))],
        Json(id),
    ))
}

/// PUT /api/todoItems/{id} - Replace a todo item's description and completion flag
async fn update_todo_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTodoItemRequest>,
) -> Result<StatusCode, ApiError> {
    if req.id != id {
        return Err(ApiError::ValidationMismatch);
    }
    require_description(&req.description)?;

    let repository = state.repository();
    let mut item = repository
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(id))?;

    item.description = req.description;
    item.is_completed = req.is_completed;
    repository.update(item).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/todoItems", get(list_todo_items).post(create_todo_item))
        .route(
            "/api/todoItems/{id}",
            get(get_todo_item).put(update_todo_item),
        )
}
