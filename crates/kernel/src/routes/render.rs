//! Public rendering endpoints for shortcodes and blocks.

use axum::extract::State;
use axum::response::Html;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use crate::blocks::{GridBlockAttributes, SingleBlockAttributes, render_grid_block, render_single_block};
use crate::shortcode;
use crate::state::AppState;

#[derive(Deserialize)]
struct ShortcodeRequest {
    content: String,
}

/// Expand every known shortcode in the submitted content.
async fn render_shortcode(
    State(state): State<AppState>,
    Json(request): Json<ShortcodeRequest>,
) -> Html<String> {
    Html(shortcode::expand(state.renderer(), &request.content).await)
}

async fn render_grid(
    State(state): State<AppState>,
    Json(attrs): Json<GridBlockAttributes>,
) -> Html<String> {
    Html(render_grid_block(state.renderer(), &attrs).await)
}

async fn render_single(
    State(state): State<AppState>,
    Json(attrs): Json<SingleBlockAttributes>,
) -> Html<String> {
    Html(render_single_block(state.renderer(), &attrs).await)
}

/// Create the render router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/render/shortcode", post(render_shortcode))
        .route("/render/blocks/grid", post(render_grid))
        .route("/render/blocks/single", post(render_single))
}
