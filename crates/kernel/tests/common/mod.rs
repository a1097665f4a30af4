#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! Every [`TestApp`] runs the real router over in-memory settings and
//! content stores, so tests are isolated and need no external services.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use vetrina_kernel::content::{ContentStore, MemoryContentStore};
use vetrina_kernel::models::NewItem;
use vetrina_kernel::routes::build_router;
use vetrina_kernel::store::{MemoryBackend, SettingsBackend};
use vetrina_kernel::{AppState, Config};
use vetrina_test_utils::memory_state;

/// Test application wrapping the full router.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub backend: Arc<MemoryBackend>,
    pub content: Arc<MemoryContentStore>,
}

impl TestApp {
    /// App with an empty store and no admin token.
    pub async fn new() -> Self {
        Self::with_config(Config::for_tests()).await
    }

    /// App with the default "services" type seeded.
    pub async fn seeded() -> Self {
        Self::with_config(Config {
            seed_defaults: true,
            ..Config::for_tests()
        })
        .await
    }

    pub async fn with_config(config: Config) -> Self {
        let parts = memory_state(&config)
            .await
            .expect("Failed to build test state");
        let router = build_router(parts.state.clone());
        Self {
            router,
            state: parts.state,
            backend: parts.backend,
            content: parts.content,
        }
    }

    /// Second app over the same settings and content, as another process
    /// serving the same site would be.
    pub async fn sharing_stores(&self) -> Self {
        let state = AppState::from_parts(
            &Config::for_tests(),
            self.backend.clone() as Arc<dyn SettingsBackend>,
            self.content.clone() as Arc<dyn ContentStore>,
        )
        .await
        .expect("Failed to build second state");
        Self {
            router: build_router(state.clone()),
            state,
            backend: self.backend.clone(),
            content: self.content.clone(),
        }
    }

    /// Store an item directly in the content store.
    pub async fn create_item(&self, input: NewItem) -> u64 {
        self.content
            .create(input)
            .await
            .expect("Failed to create item")
            .id
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// Send a request with cookies from a previous response.
    pub async fn request_with_cookies(
        &self,
        mut request: Request<Body>,
        cookies: &str,
    ) -> Response {
        if !cookies.is_empty() {
            request.headers_mut().insert(
                header::COOKIE,
                cookies.parse().expect("Invalid cookie header"),
            );
        }
        self.request(request).await
    }

    /// Fetch the admin overview and return it with the session cookies.
    pub async fn overview(&self, cookies: &str) -> (serde_json::Value, String) {
        let response = self
            .request_with_cookies(
                Request::get("/admin/portfolio").body(Body::empty()).unwrap(),
                cookies,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let set = extract_cookies(&response);
        let cookies = if set.is_empty() {
            cookies.to_string()
        } else {
            set
        };
        (body_json(response).await, cookies)
    }

    /// POST a form-encoded body.
    pub async fn post_form(&self, uri: &str, pairs: &[(&str, &str)], cookies: &str) -> Response {
        let body = form_body(pairs);
        self.request_with_cookies(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
            cookies,
        )
        .await
    }

    /// POST a JSON body.
    pub async fn post_json(&self, uri: &str, value: serde_json::Value) -> Response {
        self.request(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
        )
        .await
    }
}

/// Encode key/value pairs as an urlencoded form body.
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Extract Set-Cookie headers from a response for use in subsequent requests.
pub fn extract_cookies(response: &Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collect a response body as a string.
pub async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).expect("Body is not JSON")
}
