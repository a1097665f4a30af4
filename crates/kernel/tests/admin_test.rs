#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Admin route tests through the full router.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use common::{TestApp, body_json, body_string, extract_cookies};
use vetrina_kernel::Config;
use vetrina_kernel::render::GridQuery;
use vetrina_kernel::store::SettingsBackend;
use vetrina_test_utils::{definition, test_item};

fn token<'a>(overview: &'a serde_json::Value, name: &str) -> &'a str {
    overview["tokens"][name].as_str().expect("token present")
}

async fn add_projects(app: &TestApp, cookies: &str) -> serde_json::Value {
    let (overview, cookies) = app.overview(cookies).await;
    let response = app
        .post_form(
            "/admin/portfolio/post-types",
            &[
                ("_token", token(&overview, "add_post_type")),
                ("post_type_slug", "projects"),
                ("singular_name", "Project"),
                ("plural_name", "Projects"),
                ("slug", "our-work"),
                ("supports[]", "title"),
                ("supports[]", "excerpt"),
                ("has_archive", "1"),
                ("public", "1"),
            ],
            &cookies,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

async fn add_type(app: &TestApp, slug: &str, singular: &str, plural: &str) -> StatusCode {
    let (overview, cookies) = app.overview("").await;
    app.post_form(
        "/admin/portfolio/post-types",
        &[
            ("_token", token(&overview, "add_post_type")),
            ("post_type_slug", slug),
            ("singular_name", singular),
            ("plural_name", plural),
        ],
        &cookies,
    )
    .await
    .status()
}

async fn add_taxonomy_to(app: &TestApp, owner: &str, slug: &str, singular: &str, plural: &str) {
    let (overview, cookies) = app.overview("").await;
    let response = app
        .post_form(
            "/admin/portfolio/taxonomies",
            &[
                ("_token", token(&overview, "add_taxonomy")),
                ("post_type", owner),
                ("taxonomy_slug", slug),
                ("taxonomy_singular_name", singular),
                ("taxonomy_plural_name", plural),
            ],
            &cookies,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Follow a delete link, taking its token from a fresh overview.
async fn follow_delete(
    app: &TestApp,
    path: &str,
    delete_token: impl Fn(&serde_json::Value) -> String,
) -> StatusCode {
    let (overview, cookies) = app.overview("").await;
    let token = delete_token(&overview);
    app.request_with_cookies(
        Request::get(format!("{path}?_token={token}"))
            .body(Body::empty())
            .unwrap(),
        &cookies,
    )
    .await
    .status()
}

#[tokio::test]
async fn test_health_reports_store_state() {
    let app = TestApp::seeded().await;
    let response = app
        .request(Request::get("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["settings_backend"], "memory");
    assert_eq!(body["settings_revision"], 1);
    assert_eq!(body["content_types"], 1);
}

#[tokio::test]
async fn test_overview_lists_definitions_with_tokens() {
    let app = TestApp::seeded().await;
    let (overview, cookies) = app.overview("").await;

    assert!(!cookies.is_empty(), "overview should start a session");
    assert_eq!(overview["revision"], 1);
    assert!(!token(&overview, "add_post_type").is_empty());
    assert!(!token(&overview, "add_taxonomy").is_empty());

    let services = &overview["post_types"][0];
    assert_eq!(services["slug"], "services");
    assert_eq!(services["name"], "devonebc_services");
    assert_eq!(services["menu_position"], 25);
    assert_eq!(services["url"], "/services/");
    assert_eq!(services["taxonomies"][0]["slug"], "services_categories");
    assert!(services["delete_token"].as_str().is_some());
}

#[tokio::test]
async fn test_add_post_type_registers_it() {
    let app = TestApp::new().await;
    let notice = add_projects(&app, "").await;

    assert_eq!(notice["level"], "success");
    assert_eq!(notice["code"], "post_type_added");
    assert_eq!(
        notice["message"],
        "Post type \"Projects\" has been added successfully."
    );

    let registration = app
        .state
        .registry()
        .content_type("devonebc_projects")
        .expect("registered");
    assert_eq!(registration.rewrite_slug, "our-work");
    assert_eq!(registration.menu_position, 25);
    assert!(registration.has_archive);
    assert!(!registration.show_in_rest);

    let persisted = app.backend.read().await.unwrap().unwrap();
    assert_eq!(persisted.revision, 1);
    assert!(persisted.post_types.contains_key("projects"));
}

#[tokio::test]
async fn test_add_post_type_without_token_is_forbidden() {
    let app = TestApp::new().await;
    let (_, cookies) = app.overview("").await;

    let response = app
        .post_form(
            "/admin/portfolio/post-types",
            &[
                ("post_type_slug", "projects"),
                ("singular_name", "Project"),
                ("plural_name", "Projects"),
            ],
            &cookies,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(app.state.registry().is_empty());
    assert!(app.backend.read().await.unwrap().is_none());
}

#[tokio::test]
async fn test_token_is_single_use() {
    let app = TestApp::new().await;
    let (overview, cookies) = app.overview("").await;
    let submitted = token(&overview, "add_post_type").to_string();

    let fields = [
        ("_token", submitted.as_str()),
        ("post_type_slug", "projects"),
        ("singular_name", "Project"),
        ("plural_name", "Projects"),
    ];
    let first = app
        .post_form("/admin/portfolio/post-types", &fields, &cookies)
        .await;
    assert_eq!(first.status(), StatusCode::OK);

    let replay = app
        .post_form("/admin/portfolio/post-types", &fields, &cookies)
        .await;
    assert_eq!(replay.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_duplicate_and_missing_fields_are_rejected() {
    let app = TestApp::new().await;
    add_projects(&app, "").await;

    let (overview, cookies) = app.overview("").await;
    let response = app
        .post_form(
            "/admin/portfolio/post-types",
            &[
                ("_token", token(&overview, "add_post_type")),
                ("post_type_slug", "projects"),
                ("singular_name", "Again"),
                ("plural_name", "Agains"),
            ],
            &cookies,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let notice = body_json(response).await;
    assert_eq!(notice["level"], "error");
    assert_eq!(notice["code"], "post_type_exists");

    let (overview, cookies) = app.overview(&cookies).await;
    let response = app
        .post_form(
            "/admin/portfolio/taxonomies",
            &[
                ("_token", token(&overview, "add_taxonomy")),
                ("post_type", "projects"),
                ("taxonomy_slug", "project_tags"),
                ("taxonomy_singular_name", "Tag"),
            ],
            &cookies,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "taxonomy_missing_fields");

    let store = app.state.store().lock().await;
    assert_eq!(store.revision(), 1);
    assert_eq!(store.definition("projects").unwrap().singular_label, "Project");
}

#[tokio::test]
async fn test_add_taxonomy_to_unknown_owner() {
    let app = TestApp::new().await;
    let (overview, cookies) = app.overview("").await;
    let response = app
        .post_form(
            "/admin/portfolio/taxonomies",
            &[
                ("_token", token(&overview, "add_taxonomy")),
                ("post_type", "ghosts"),
                ("taxonomy_slug", "ghost_tags"),
                ("taxonomy_singular_name", "Tag"),
                ("taxonomy_plural_name", "Tags"),
            ],
            &cookies,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["code"], "unknown_post_type");
    assert!(app.state.registry().taxonomies().is_empty());
}

#[tokio::test]
async fn test_add_then_delete_taxonomy() {
    let app = TestApp::new().await;
    add_projects(&app, "").await;

    let (overview, cookies) = app.overview("").await;
    let response = app
        .post_form(
            "/admin/portfolio/taxonomies",
            &[
                ("_token", token(&overview, "add_taxonomy")),
                ("post_type", "projects"),
                ("taxonomy_slug", "project_tags"),
                ("taxonomy_singular_name", "Tag"),
                ("taxonomy_plural_name", "Tags"),
                ("hierarchical", "1"),
            ],
            &cookies,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let notice = body_json(response).await;
    assert_eq!(
        notice["message"],
        "Taxonomy \"Tags\" has been added successfully to \"Projects\"."
    );
    let registry = app.state.registry();
    assert!(registry.taxonomy_applies_to("devonebc_project_tags", "devonebc_projects"));

    let (overview, cookies) = app.overview(&cookies).await;
    let delete_token = overview["post_types"][0]["taxonomies"][0]["delete_token"]
        .as_str()
        .unwrap();
    let response = app
        .request_with_cookies(
            Request::get(format!(
                "/admin/portfolio/taxonomies/projects/project_tags/delete?_token={delete_token}"
            ))
            .body(Body::empty())
            .unwrap(),
            &cookies,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["code"], "taxonomy_deleted");
    assert!(registry.taxonomy("devonebc_project_tags").is_none());
    assert!(registry.has_content_type("devonebc_projects"));
}

#[tokio::test]
async fn test_delete_post_type_link_unregisters() {
    let app = TestApp::seeded().await;
    let item = app
        .create_item(test_item("devonebc_services", "Audit").build())
        .await;

    let (overview, cookies) = app.overview("").await;
    let delete_token = overview["post_types"][0]["delete_token"].as_str().unwrap();
    let response = app
        .request_with_cookies(
            Request::get(format!(
                "/admin/portfolio/post-types/services/delete?_token={delete_token}"
            ))
            .body(Body::empty())
            .unwrap(),
            &cookies,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Post type \"Services\" has been deleted successfully."
    );
    assert!(app.state.registry().is_empty());
    assert!(app.state.registry().taxonomies().is_empty());

    // Items of the removed type stay stored but no longer render.
    let response = app
        .post_json("/render/blocks/single", json!({ "serviceId": item }))
        .await;
    assert_eq!(body_string(response).await, "<p>Selected item not found.</p>");
}

#[tokio::test]
async fn test_delete_token_is_bound_to_target() {
    let app = TestApp::seeded().await;
    add_projects(&app, "").await;

    let (overview, cookies) = app.overview("").await;
    // Token issued for "services", replayed against "projects".
    let services_token = overview["post_types"][0]["delete_token"].as_str().unwrap();
    let response = app
        .request_with_cookies(
            Request::get(format!(
                "/admin/portfolio/post-types/projects/delete?_token={services_token}"
            ))
            .body(Body::empty())
            .unwrap(),
            &cookies,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(app.state.registry().has_content_type("devonebc_projects"));
}

#[tokio::test]
async fn test_suggest_slug_and_plural() {
    let app = TestApp::new().await;
    let response = app
        .request(
            Request::get("/admin/portfolio/suggest?singular=Case%20Study")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["slug"], "case_study");
    assert_eq!(body["plural"], "Case Studys");
}

#[tokio::test]
async fn test_admin_token_is_enforced() {
    let app = TestApp::with_config(Config {
        admin_token: Some("s3cret".to_string()),
        ..Config::for_tests()
    })
    .await;

    let response = app
        .request(Request::get("/admin/portfolio").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()["www-authenticate"], "Bearer");

    let response = app
        .request(
            Request::get("/admin/portfolio")
                .header("Authorization", "Bearer wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            Request::get("/admin/portfolio")
                .header("Authorization", "Bearer s3cret")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!extract_cookies(&response).is_empty());

    // Public render routes stay open.
    let response = app
        .request(Request::get("/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_render_and_editor_endpoints() {
    let app = TestApp::seeded().await;
    app.create_item(test_item("devonebc_services", "Strategy").build())
        .await;

    let response = app
        .post_json(
            "/render/shortcode",
            json!({ "content": "<h2>Services</h2>[display_services count=\"1\"]" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.starts_with("<h2>Services</h2><div class=\"devonebc-portfolio-grid"));
    assert!(html.contains(">Strategy<"));

    let response = app
        .post_json("/render/blocks/grid", json!({ "columns": 4 }))
        .await;
    let html = body_string(response).await;
    assert!(html.starts_with("<div class=\"devonebc-services-grid columns-4\">"));

    let response = app
        .request(Request::get("/editor/data").body(Body::empty()).unwrap())
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await;
    assert_eq!(data["post_types"][0]["value"], "services");
    assert_eq!(data["items"][0]["label"], "Strategy");
    assert_eq!(data["blocks"][0]["name"], "vetrina/services-grid");

    let response = app
        .post_json("/editor/preview/single", json!({ "serviceId": 0 }))
        .await;
    assert_eq!(
        body_json(response).await["html"],
        "<p>Please select an item to display.</p>"
    );
}

#[tokio::test]
async fn test_menu_positions_follow_store_after_delete_and_add() {
    let app = TestApp::new().await;
    for (slug, singular, plural) in [("a", "A", "As"), ("b", "B", "Bs"), ("c", "C", "Cs")] {
        assert_eq!(add_type(&app, slug, singular, plural).await, StatusCode::OK);
    }

    let status = follow_delete(&app, "/admin/portfolio/post-types/a/delete", |o| {
        o["post_types"][0]["delete_token"].as_str().unwrap().to_string()
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(add_type(&app, "d", "D", "Ds").await, StatusCode::OK);

    let registry = app.state.registry();
    let (overview, _) = app.overview("").await;
    let rows = overview["post_types"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    for (row, (name, position)) in rows.iter().zip([
        ("devonebc_b", 25),
        ("devonebc_c", 30),
        ("devonebc_d", 35),
    ]) {
        assert_eq!(row["name"], name);
        assert_eq!(row["menu_position"], position);
        assert_eq!(registry.content_type(name).unwrap().menu_position, position);
    }
    assert!(!registry.has_content_type("devonebc_a"));
    assert_eq!(registry.len(), 3);
}

#[tokio::test]
async fn test_shared_taxonomy_survives_other_owner_removal() {
    let app = TestApp::new().await;
    assert_eq!(add_type(&app, "a", "A", "As").await, StatusCode::OK);
    assert_eq!(add_type(&app, "b", "B", "Bs").await, StatusCode::OK);
    add_taxonomy_to(&app, "a", "cats", "Cat", "Cats").await;
    add_taxonomy_to(&app, "b", "cats", "Cat", "Cats").await;

    app.create_item(
        test_item("devonebc_b", "Tagged")
            .with_term("devonebc_cats", "x")
            .build(),
    )
    .await;
    app.create_item(test_item("devonebc_b", "Plain").build()).await;
    let query = GridQuery {
        category: Some("x".to_string()),
        taxonomy: Some("cats".to_string()),
        ..GridQuery::for_source("b")
    };
    let registry = app.state.registry();

    let status = follow_delete(&app, "/admin/portfolio/taxonomies/a/cats/delete", |o| {
        o["post_types"][0]["taxonomies"][0]["delete_token"]
            .as_str()
            .unwrap()
            .to_string()
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(registry.taxonomy_applies_to("devonebc_cats", "devonebc_b"));
    let html = app.state.renderer().render_grid(&query).await;
    assert!(html.contains(">Tagged<"));
    assert!(!html.contains(">Plain<"));

    // Same again when the other owner goes away with its whole type.
    add_taxonomy_to(&app, "a", "cats", "Cat", "Cats").await;
    let status = follow_delete(&app, "/admin/portfolio/post-types/a/delete", |o| {
        o["post_types"][0]["delete_token"].as_str().unwrap().to_string()
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(registry.taxonomy_applies_to("devonebc_cats", "devonebc_b"));
    let html = app.state.renderer().render_grid(&query).await;
    assert!(html.contains(">Tagged<"));
    assert!(!html.contains(">Plain<"));
}

#[tokio::test]
async fn test_conflict_is_recoverable_on_retry() {
    let first = TestApp::new().await;
    let second = first.sharing_stores().await;

    assert_eq!(
        add_type(&first, "projects", "Project", "Projects").await,
        StatusCode::OK
    );

    let (overview, cookies) = second.overview("").await;
    let response = second
        .post_form(
            "/admin/portfolio/post-types",
            &[
                ("_token", token(&overview, "add_post_type")),
                ("post_type_slug", "events"),
                ("singular_name", "Event"),
                ("plural_name", "Events"),
            ],
            &cookies,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "settings_conflict");
    // The losing process now serves what the winner saved.
    assert!(second.state.registry().has_content_type("devonebc_projects"));

    assert_eq!(
        add_type(&second, "events", "Event", "Events").await,
        StatusCode::OK
    );
    let registry = second.state.registry();
    assert!(registry.has_content_type("devonebc_projects"));
    assert!(registry.has_content_type("devonebc_events"));

    let persisted = second.backend.read().await.unwrap().unwrap();
    assert_eq!(persisted.revision, 2);
    assert_eq!(persisted.post_types.len(), 2);
}

#[tokio::test]
async fn test_delete_links_stay_valid_on_large_overview() {
    let app = TestApp::new().await;
    {
        let mut store = app.state.store().lock().await;
        for i in 0..40 {
            let slug = format!("type_{i:02}");
            store
                .add_definition(definition(&slug, "Thing", "Things"))
                .await
                .unwrap();
        }
        app.state.registrar().sync(&store);
    }

    let (overview, cookies) = app.overview("").await;
    let first_token = overview["post_types"][0]["delete_token"].as_str().unwrap();
    let response = app
        .request_with_cookies(
            Request::get(format!(
                "/admin/portfolio/post-types/type_00/delete?_token={first_token}"
            ))
            .body(Body::empty())
            .unwrap(),
            &cookies,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!app.state.registry().has_content_type("devonebc_type_00"));
    assert_eq!(app.state.registry().len(), 39);
}
