//! Admin notices.
//!
//! Every admin action answers with one notice. Store errors become error
//! notices with a matching HTTP status.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::StoreError;
use crate::models::{Definition, TaxonomyDefinition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A message shown to the administrator after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminNotice {
    pub level: NoticeLevel,
    pub code: &'static str,
    pub message: String,
}

impl AdminNotice {
    fn success(code: &'static str, message: String) -> Self {
        Self {
            level: NoticeLevel::Success,
            code,
            message,
        }
    }

    pub fn definition_added(definition: &Definition) -> Self {
        Self::success(
            "post_type_added",
            format!(
                "Post type \"{}\" has been added successfully.",
                definition.plural_label
            ),
        )
    }

    pub fn taxonomy_added(taxonomy: &TaxonomyDefinition, owner_label: &str) -> Self {
        Self::success(
            "taxonomy_added",
            format!(
                "Taxonomy \"{}\" has been added successfully to \"{owner_label}\".",
                taxonomy.plural_label
            ),
        )
    }

    pub fn definition_deleted(definition: &Definition) -> Self {
        Self::success(
            "post_type_deleted",
            format!(
                "Post type \"{}\" has been deleted successfully.",
                definition.plural_label
            ),
        )
    }

    pub fn taxonomy_deleted(taxonomy: &TaxonomyDefinition) -> Self {
        Self::success(
            "taxonomy_deleted",
            format!(
                "Taxonomy \"{}\" has been deleted successfully.",
                taxonomy.plural_label
            ),
        )
    }

    /// Deleting something that does not exist.
    pub fn nothing_to_delete() -> Self {
        Self {
            level: NoticeLevel::Info,
            code: "not_found",
            message: "Nothing to delete.".to_string(),
        }
    }

    /// Notice for a store error. `taxonomy` selects the taxonomy wording.
    pub fn from_store_error(err: &StoreError, taxonomy: bool) -> Self {
        let (code, message) = match err {
            StoreError::Validation { .. } if taxonomy => (
                "taxonomy_missing_fields",
                "Please fill in all required fields.".to_string(),
            ),
            StoreError::Validation { .. } => (
                "missing_fields",
                "Please fill in all required fields.".to_string(),
            ),
            StoreError::DuplicateSlug { owner: Some(_), .. } => (
                "taxonomy_exists",
                "A taxonomy with this slug already exists for the selected post type."
                    .to_string(),
            ),
            StoreError::DuplicateSlug { owner: None, .. } => (
                "post_type_exists",
                "A post type with this slug already exists.".to_string(),
            ),
            StoreError::UnknownOwner { owner } => (
                "unknown_post_type",
                format!("Post type \"{owner}\" does not exist."),
            ),
            StoreError::Conflict { .. } => (
                "settings_conflict",
                "Settings were changed by another administrator. Reload and try again."
                    .to_string(),
            ),
            StoreError::Persist(_) => (
                "settings_error",
                "Settings could not be saved.".to_string(),
            ),
        };
        Self {
            level: NoticeLevel::Error,
            code,
            message,
        }
    }
}

/// HTTP status for a store error.
pub fn status_for(err: &StoreError) -> StatusCode {
    match err {
        StoreError::Conflict { .. } => StatusCode::CONFLICT,
        StoreError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// A notice with its status, returned from admin handlers.
#[derive(Debug)]
pub struct NoticeResponse {
    pub status: StatusCode,
    pub notice: AdminNotice,
}

impl NoticeResponse {
    pub fn ok(notice: AdminNotice) -> Self {
        Self {
            status: StatusCode::OK,
            notice,
        }
    }

    pub fn store_error(err: &StoreError, taxonomy: bool) -> Self {
        if let StoreError::Persist(e) = err {
            tracing::error!(error = %e, "failed to persist settings");
        }
        Self {
            status: status_for(err),
            notice: AdminNotice::from_store_error(err, taxonomy),
        }
    }
}

impl IntoResponse for NoticeResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.notice)).into_response()
    }
}
