//! Admin routes for managing content types and taxonomies.
//!
//! Submissions are form-encoded like a classic admin form. Every action
//! answers with an [`AdminNotice`] as JSON.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use tracing::{info, warn};

use super::helpers::{
    ADD_DEFINITION_ACTION, ADD_TAXONOMY_ACTION, delete_definition_action, delete_taxonomy_action,
    require_csrf, require_link_token,
};
use crate::error::{AppResult, StoreError};
use crate::form::{FormFields, generate_csrf_token, generate_link_token};
use crate::models::Feature;
use crate::notice::{AdminNotice, NoticeResponse};
use crate::sanitize::{suggest_plural, suggest_slug};
use crate::state::AppState;
use crate::store::DefinitionStore;

// =============================================================================
// Overview
// =============================================================================

#[derive(Serialize)]
struct TaxonomyRow {
    slug: String,
    name: String,
    singular: String,
    plural: String,
    url: String,
    hierarchical: bool,
    public: bool,
    show_in_nav_menus: bool,
    show_in_rest: bool,
    delete_token: String,
}

#[derive(Serialize)]
struct DefinitionRow {
    slug: String,
    name: String,
    singular: String,
    plural: String,
    url: String,
    icon: String,
    menu_position: u32,
    supports: Vec<&'static str>,
    has_archive: bool,
    public: bool,
    show_in_rest: bool,
    taxonomies: Vec<TaxonomyRow>,
    delete_token: String,
}

#[derive(Serialize)]
struct FormTokens {
    add_post_type: String,
    add_taxonomy: String,
}

#[derive(Serialize)]
struct Overview {
    revision: u64,
    post_types: Vec<DefinitionRow>,
    features: Vec<&'static str>,
    tokens: FormTokens,
}

async fn token(session: &Session, action: &str) -> AppResult<String> {
    Ok(generate_csrf_token(session, action).await?)
}

async fn link_token(session: &Session, action: &str) -> AppResult<String> {
    Ok(generate_link_token(session, action).await?)
}

/// Stored definitions with their registration details and fresh tokens.
async fn overview(State(state): State<AppState>, session: Session) -> AppResult<Json<Overview>> {
    let store = state.store().lock().await;
    let registrar = state.registrar();

    let mut post_types = Vec::new();
    for (index, definition) in store.definitions().enumerate() {
        let mut taxonomies = Vec::new();
        for taxonomy in store.taxonomies_for(&definition.slug) {
            taxonomies.push(TaxonomyRow {
                slug: taxonomy.slug.clone(),
                name: registrar.taxonomy_name(&taxonomy.slug),
                singular: taxonomy.singular_label.clone(),
                plural: taxonomy.plural_label.clone(),
                url: format!("/{}/", taxonomy.url_slug),
                hierarchical: taxonomy.is_hierarchical,
                public: taxonomy.is_public,
                show_in_nav_menus: taxonomy.show_in_menus,
                show_in_rest: taxonomy.exposed_via_api,
                delete_token: link_token(
                    &session,
                    &delete_taxonomy_action(&definition.slug, &taxonomy.slug),
                )
                .await?,
            });
        }

        post_types.push(DefinitionRow {
            slug: definition.slug.clone(),
            name: registrar.content_type_name(&definition.slug),
            singular: definition.singular_label.clone(),
            plural: definition.plural_label.clone(),
            url: format!("/{}/", definition.url_slug),
            icon: definition.icon.clone(),
            menu_position: registrar.menu_position(index),
            supports: definition
                .supported_features
                .iter()
                .map(Feature::as_str)
                .collect(),
            has_archive: definition.has_archive,
            public: definition.is_public,
            show_in_rest: definition.exposed_via_api,
            taxonomies,
            delete_token: link_token(&session, &delete_definition_action(&definition.slug))
                .await?,
        });
    }

    Ok(Json(Overview {
        revision: store.revision(),
        post_types,
        features: Feature::ALL.iter().map(Feature::as_str).collect(),
        tokens: FormTokens {
            add_post_type: token(&session, ADD_DEFINITION_ACTION).await?,
            add_taxonomy: token(&session, ADD_TAXONOMY_ACTION).await?,
        },
    }))
}

// =============================================================================
// Add
// =============================================================================

/// Answer a failed mutation. A revision conflict means another process
/// saved first: adopt its record so the next submission can succeed.
async fn store_failure(
    state: &AppState,
    store: &mut DefinitionStore,
    err: &StoreError,
    taxonomy: bool,
) -> Response {
    if matches!(err, StoreError::Conflict { .. }) {
        match store.reload().await {
            Ok(()) => {
                state.registrar().sync(store);
                info!(revision = store.revision(), "settings reloaded after conflict");
            }
            Err(e) => warn!(error = %e, "failed to reload settings after conflict"),
        }
    }
    NoticeResponse::store_error(err, taxonomy).into_response()
}

async fn add_definition(State(state): State<AppState>, session: Session, body: Bytes) -> Response {
    let form = FormFields::parse(&body);
    if let Err(rejection) = require_csrf(&session, ADD_DEFINITION_ACTION, form.text("_token")).await {
        return rejection;
    }

    let mut store = state.store().lock().await;
    match store.add_definition(form.new_definition()).await {
        Ok(definition) => {
            state.registrar().sync(&store);
            NoticeResponse::ok(AdminNotice::definition_added(&definition)).into_response()
        }
        Err(e) => store_failure(&state, &mut store, &e, false).await,
    }
}

async fn add_taxonomy(State(state): State<AppState>, session: Session, body: Bytes) -> Response {
    let form = FormFields::parse(&body);
    if let Err(rejection) = require_csrf(&session, ADD_TAXONOMY_ACTION, form.text("_token")).await {
        return rejection;
    }

    let (owner, input) = form.new_taxonomy();
    let mut store = state.store().lock().await;
    match store.add_taxonomy(&owner, input).await {
        Ok(taxonomy) => {
            state.registrar().sync(&store);
            let owner_label = store
                .definition(&owner)
                .map_or(owner.as_str(), |d| d.plural_label.as_str());
            NoticeResponse::ok(AdminNotice::taxonomy_added(&taxonomy, owner_label))
                .into_response()
        }
        Err(e) => store_failure(&state, &mut store, &e, true).await,
    }
}

// =============================================================================
// Delete (link actions)
// =============================================================================

#[derive(Deserialize)]
struct TokenQuery {
    #[serde(default, rename = "_token")]
    token: String,
}

async fn delete_definition(
    State(state): State<AppState>,
    session: Session,
    Path(slug): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Response {
    if let Err(rejection) =
        require_link_token(&session, &delete_definition_action(&slug), &query.token).await
    {
        return rejection;
    }

    let mut store = state.store().lock().await;
    match store.delete_definition(&slug).await {
        Ok(Some(removed)) => {
            state.registrar().sync(&store);
            NoticeResponse::ok(AdminNotice::definition_deleted(&removed.definition))
                .into_response()
        }
        Ok(None) => NoticeResponse::ok(AdminNotice::nothing_to_delete()).into_response(),
        Err(e) => store_failure(&state, &mut store, &e, false).await,
    }
}

async fn delete_taxonomy(
    State(state): State<AppState>,
    session: Session,
    Path((owner, slug)): Path<(String, String)>,
    Query(query): Query<TokenQuery>,
) -> Response {
    if let Err(rejection) =
        require_link_token(&session, &delete_taxonomy_action(&owner, &slug), &query.token).await
    {
        return rejection;
    }

    let mut store = state.store().lock().await;
    match store.delete_taxonomy(&owner, &slug).await {
        Ok(Some(removed)) => {
            state.registrar().sync(&store);
            NoticeResponse::ok(AdminNotice::taxonomy_deleted(&removed)).into_response()
        }
        Ok(None) => NoticeResponse::ok(AdminNotice::nothing_to_delete()).into_response(),
        Err(e) => store_failure(&state, &mut store, &e, true).await,
    }
}

// =============================================================================
// Suggestions
// =============================================================================

#[derive(Deserialize)]
struct SuggestQuery {
    #[serde(default)]
    singular: String,
}

#[derive(Serialize)]
struct Suggestion {
    slug: String,
    plural: String,
}

/// Slug and plural label suggested from a singular label.
async fn suggest(Query(query): Query<SuggestQuery>) -> Json<Suggestion> {
    Json(Suggestion {
        slug: suggest_slug(&query.singular),
        plural: suggest_plural(&query.singular),
    })
}

/// Create the admin router.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/portfolio", get(overview))
        .route("/admin/portfolio/post-types", post(add_definition))
        .route("/admin/portfolio/taxonomies", post(add_taxonomy))
        .route(
            "/admin/portfolio/post-types/{slug}/delete",
            get(delete_definition),
        )
        .route(
            "/admin/portfolio/taxonomies/{owner}/{slug}/delete",
            get(delete_taxonomy),
        )
        .route("/admin/portfolio/suggest", get(suggest))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            crate::middleware::require_admin_token,
        ))
}
