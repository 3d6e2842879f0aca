//! JSON API route handlers.

use address_book_core::{AddressId, AddressRecord, NewAddress};
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use tracing::instrument;

use super::addresses::ListQuery;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Response for `GET /api`.
#[derive(Debug, Serialize)]
pub struct ApiInfo {
    pub message: &'static str,
}

/// Response for `GET /api/addresses`.
#[derive(Debug, Serialize)]
pub struct AddressListResponse {
    pub addresses: Vec<AddressRecord>,
    pub count: usize,
}

/// Response for `POST /api/addresses`.
#[derive(Debug, Serialize)]
pub struct AddressCreatedResponse {
    pub message: &'static str,
    pub address: AddressRecord,
}

/// API banner.
pub async fn info() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "Address Book API",
    })
}

/// List addresses in insertion order, optionally filtered by `q`.
///
/// GET /api/addresses
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<AddressListResponse> {
    let addresses = state.addresses().search(&query.q);
    Json(AddressListResponse {
        count: addresses.len(),
        addresses,
    })
}

/// Create an address.
///
/// POST /api/addresses
///
/// Returns 201 with the stored record, 422 with field errors when validation
/// fails, or 400 when the body is not JSON.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewAddress>, JsonRejection>,
) -> Result<(StatusCode, Json<AddressCreatedResponse>)> {
    let Json(input) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let address = state.addresses().create(&input)?;
    tracing::info!(id = %address.id(), city = %address.city(), "Address created via API");

    Ok((
        StatusCode::CREATED,
        Json(AddressCreatedResponse {
            message: "Address created",
            address,
        }),
    ))
}

/// Fetch one address.
///
/// GET /api/addresses/{id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AddressRecord>> {
    AddressId::parse(&id)
        .and_then(|id| state.addresses().get(id))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("address {id}")))
}

/// Create the API routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(info))
        .route("/addresses", get(list).post(create))
        .route("/addresses/{id}", get(show))
}
