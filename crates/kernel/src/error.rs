//! Application error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised by definition store mutations.
///
/// Validation runs before any mutation, so every variant except
/// `Conflict` and `Persist` guarantees the store is unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("missing required fields: {}", fields.join(", "))]
    Validation { fields: Vec<&'static str> },

    #[error("slug '{slug}' already exists")]
    DuplicateSlug {
        slug: String,
        /// Owning content type when the collision is between taxonomies.
        owner: Option<String>,
    },

    #[error("content type '{owner}' does not exist")]
    UnknownOwner { owner: String },

    #[error("settings changed concurrently (expected revision {expected}, found {current})")]
    Conflict { expected: u64, current: u64 },

    #[error("failed to persist settings")]
    Persist(#[from] anyhow::Error),
}

impl StoreError {
    /// Whether the error leaves the persisted record untouched and is the
    /// submitter's to fix.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            StoreError::Validation { .. }
                | StoreError::DuplicateSlug { .. }
                | StoreError::UnknownOwner { .. }
        )
    }
}

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("not found")]
    NotFound,

    #[error("forbidden")]
    Forbidden,

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal server error");
                "internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, body).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
