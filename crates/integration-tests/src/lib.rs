//! Integration tests for the address book.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p address-book-integration-tests
//! ```
//!
//! Tests build the real router with [`TestApp::new`] and drive it in-process
//! with `tower::ServiceExt::oneshot`; no server or network is involved.
//!
//! # Test Categories
//!
//! - `api_addresses` - JSON API
//! - `address_pages` - HTML pages and HTMX fragments

use address_book_core::{AddressRecord, AddressStore, NewAddress};
use address_book_web::config::WebConfig;
use address_book_web::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use tower::ServiceExt;

/// A router plus a handle on the store behind it.
pub struct TestApp {
    pub store: AddressStore,
    router: Router,
}

/// A buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body is not JSON")
    }

    /// Get a header as a string.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Build the app around a fresh, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WebConfig::default())
    }

    /// Build the app with custom configuration.
    #[must_use]
    pub fn with_config(config: WebConfig) -> Self {
        let store = AddressStore::with_rules(config.address_rules);
        let router = address_book_web::app(AppState::with_store(config, store.clone()));
        Self { store, router }
    }

    /// Insert an address directly into the store.
    ///
    /// # Panics
    ///
    /// Panics if the address is invalid.
    pub fn seed(&self, street: &str, city: &str) -> AddressRecord {
        self.store
            .create(&NewAddress::new(street, city, "TX", "78701", None))
            .expect("seed address should be valid")
    }

    /// Send a request and buffer the response.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response: Response<Body> = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// GET `uri`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(request("GET", uri).body(Body::empty()).expect("valid request"))
            .await
    }

    /// DELETE `uri` as HTMX does.
    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(
            request("DELETE", uri)
                .header("hx-request", "true")
                .body(Body::empty())
                .expect("valid request"),
        )
        .await
    }

    /// POST a JSON body.
    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> TestResponse {
        self.send(
            request("POST", uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("valid request"),
        )
        .await
    }

    /// POST a urlencoded form, optionally flagged as an HTMX request.
    pub async fn post_form(&self, uri: &str, form: &str, htmx: bool) -> TestResponse {
        let mut builder =
            request("POST", uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if htmx {
            builder = builder.header("hx-request", "true");
        }
        self.send(builder.body(Body::from(form.to_owned())).expect("valid request"))
            .await
    }
}

fn request(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri)
}
