//! Mapping of repository outcomes to HTTP responses
//!
//! Client-facing messages are sent as plain text bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

pub const DESCRIPTION_EXISTS: &str = "Todo item with description already exists";
pub const UPDATING_WRONG_ITEM: &str = "Cannot update a different todo item";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";

pub fn not_found_message(id: impl std::fmt::Display) -> String {
    format!("Todo item with id {} not found", id)
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", not_found_message(.0))]
    NotFound(Uuid),
    #[error("{}", DESCRIPTION_EXISTS)]
    Conflict,
    #[error("{}", UPDATING_WRONG_ITEM)]
    ValidationMismatch,
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Infrastructure(#[from] todo_core::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::ValidationMismatch | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Infrastructure(err) => {
                error!("todo store failure: {}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}
