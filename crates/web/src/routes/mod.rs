//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                    - Home page
//! GET    /health              - Health check
//!
//! # Addresses (HTML + HTMX)
//! GET    /address             - Address form page
//! POST   /address             - Submit form (fragment for HTMX, redirect otherwise)
//! DELETE /address/{id}        - Delete (HTMX removes the row; empty-state row once none remain)
//! GET    /addresses           - Address list, optional ?q= filter
//! POST   /search-addresses    - Table rows matching `search` (HTMX fragment)
//!
//! # JSON API
//! GET    /api                 - API banner
//! GET    /api/addresses       - All addresses, optional ?q= filter
//! POST   /api/addresses       - Create address
//! GET    /api/addresses/{id}  - Single address
//! ```

pub mod addresses;
pub mod api;
pub mod home;

use axum::{
    Router,
    http::HeaderMap,
    routing::{delete, get, post},
};

use crate::state::AppState;

/// Header HTMX sets on every request it issues.
pub const HX_REQUEST_HEADER: &str = "hx-request";

/// Whether the request came from HTMX and expects an HTML fragment.
#[must_use]
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

/// Create the HTML address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/address",
            get(addresses::new_page).post(addresses::submit),
        )
        .route("/address/{id}", delete(addresses::remove))
        .route("/addresses", get(addresses::index))
        .route("/search-addresses", post(addresses::search))
}

/// Create all routes for the application.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(address_routes())
        .nest("/api", api::router())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));

        headers.insert(HX_REQUEST_HEADER, HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));

        headers.insert(HX_REQUEST_HEADER, HeaderValue::from_static("false"));
        assert!(!is_htmx(&headers));
    }
}
