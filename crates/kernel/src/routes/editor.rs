//! Editor surface endpoints.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::blocks::{GridBlockAttributes, SingleBlockAttributes};
use crate::editor::EditorData;
use crate::error::AppResult;
use crate::state::AppState;

#[derive(Serialize)]
struct Preview {
    html: String,
}

async fn editor_data(State(state): State<AppState>) -> AppResult<Json<EditorData>> {
    Ok(Json(state.editor().data().await?))
}

async fn preview_grid(
    State(state): State<AppState>,
    Json(attrs): Json<GridBlockAttributes>,
) -> Json<Preview> {
    Json(Preview {
        html: state.editor().preview_grid(&attrs).await,
    })
}

async fn preview_single(
    State(state): State<AppState>,
    Json(attrs): Json<SingleBlockAttributes>,
) -> Json<Preview> {
    Json(Preview {
        html: state.editor().preview_single(&attrs).await,
    })
}

/// Create the editor router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/editor/data", get(editor_data))
        .route("/editor/preview/grid", post(preview_grid))
        .route("/editor/preview/single", post(preview_single))
}
