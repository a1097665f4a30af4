//! Shared route helpers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower_sessions::Session;
use tracing::{debug, warn};

use crate::form::{verify_csrf_token, verify_link_token};

/// Require a valid CSRF token for `action`, or reject with 403.
pub async fn require_csrf(session: &Session, action: &str, token: &str) -> Result<(), Response> {
    match verify_csrf_token(session, action, token).await {
        Ok(true) => Ok(()),
        Ok(false) => {
            debug!(action = %action, "CSRF token rejected");
            Err(csrf_forbidden())
        }
        Err(e) => {
            warn!(action = %action, error = %e, "CSRF verification failed");
            Err(csrf_forbidden())
        }
    }
}

/// Require a valid link token for `action`, or reject with 403.
pub async fn require_link_token(
    session: &Session,
    action: &str,
    token: &str,
) -> Result<(), Response> {
    match verify_link_token(session, action, token).await {
        Ok(true) => Ok(()),
        Ok(false) => {
            debug!(action = %action, "link token rejected");
            Err(csrf_forbidden())
        }
        Err(e) => {
            warn!(action = %action, error = %e, "link token verification failed");
            Err(csrf_forbidden())
        }
    }
}

fn csrf_forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        "Invalid or expired form token. Please reload and try again.",
    )
        .into_response()
}

/// CSRF action name for deleting a content type.
pub fn delete_definition_action(slug: &str) -> String {
    format!("delete_post_type:{slug}")
}

/// CSRF action name for deleting a taxonomy.
pub fn delete_taxonomy_action(owner: &str, slug: &str) -> String {
    format!("delete_taxonomy:{owner}:{slug}")
}

/// CSRF action for the add content type form.
pub const ADD_DEFINITION_ACTION: &str = "add_post_type";

/// CSRF action for the add taxonomy form.
pub const ADD_TAXONOMY_ACTION: &str = "add_taxonomy";
