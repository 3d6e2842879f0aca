//! Address form, list, search, and delete handlers.
//!
//! Every handler is a thin shell over [`AddressStore`](address_book_core::AddressStore):
//! it extracts input, calls one store operation, and picks a template. HTMX
//! requests get fragments; plain requests get full pages or redirects.

use address_book_core::{AddressId, AddressRecord, FieldError, NewAddress, ValidationError};
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use super::is_htmx;
use crate::filters;
use crate::state::AppState;

/// List page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default, alias = "search", alias = "query")]
    pub q: String,
}

/// HTMX search form body.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default, alias = "q", alias = "query")]
    pub search: String,
}

/// Form state for rendering: submitted values plus any field errors.
#[derive(Debug, Clone, Default)]
pub struct AddressFormView {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub errors: Vec<FieldError>,
}

impl AddressFormView {
    /// Echo the submitted values back with the validation failures.
    #[must_use]
    pub fn rejected(input: &NewAddress, error: ValidationError) -> Self {
        Self {
            street: input.street.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            zip_code: input.zip_code.clone(),
            country: input.country.clone().unwrap_or_default(),
            errors: error.into_errors(),
        }
    }

    /// The error message for a field name, if it failed.
    #[must_use]
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field.as_str() == field)
            .map(|e| e.message.as_str())
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Full address form page.
#[derive(Template, WebTemplate)]
#[template(path = "addresses/form.html")]
pub struct AddressFormPageTemplate {
    pub form: AddressFormView,
}

/// Address form fragment (HTMX swap into `#form-container`).
#[derive(Template, WebTemplate)]
#[template(path = "partials/address_form.html")]
pub struct AddressFormTemplate {
    pub form: AddressFormView,
}

/// Confirmation fragment shown after an HTMX submit.
#[derive(Template, WebTemplate)]
#[template(path = "partials/address_created.html")]
pub struct AddressCreatedTemplate {
    pub record: AddressRecord,
}

/// Address list page.
#[derive(Template, WebTemplate)]
#[template(path = "addresses/list.html")]
pub struct AddressListTemplate {
    pub query: String,
    pub addresses: Vec<AddressRecord>,
    /// Records in the store, regardless of the filter.
    pub total: usize,
}

impl AddressListTemplate {
    /// "1 address" / "3 addresses".
    #[must_use]
    pub fn total_label(&self) -> String {
        let noun = if self.total == 1 { "address" } else { "addresses" };
        format!("{} {noun}", self.total)
    }
}

/// Table rows fragment (HTMX swap into `#address-table-body`).
#[derive(Template, WebTemplate)]
#[template(path = "partials/address_rows.html")]
pub struct AddressRowsTemplate {
    pub addresses: Vec<AddressRecord>,
}

/// Display the empty address form.
#[instrument]
pub async fn new_page() -> impl IntoResponse {
    AddressFormPageTemplate {
        form: AddressFormView::default(),
    }
}

/// Submit the address form.
///
/// POST /address
///
/// On validation failure the form is re-rendered with the submitted values
/// and per-field messages. HTMX requests get a 200 fragment so the swap
/// happens; plain requests get the full page with 422.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(input): Form<NewAddress>,
) -> Response {
    let htmx = is_htmx(&headers);

    match state.addresses().create(&input) {
        Ok(record) => {
            tracing::info!(id = %record.id(), city = %record.city(), "Address created");
            if htmx {
                AddressCreatedTemplate { record }.into_response()
            } else {
                Redirect::to("/addresses").into_response()
            }
        }
        Err(error) => {
            tracing::debug!(
                fields = ?error.errors().iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
                "Address form rejected"
            );
            let form = AddressFormView::rejected(&input, error);
            if htmx {
                AddressFormTemplate { form }.into_response()
            } else {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    AddressFormPageTemplate { form },
                )
                    .into_response()
            }
        }
    }
}

/// Display all addresses, optionally filtered by `q`.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let store = state.addresses();

    AddressListTemplate {
        addresses: store.search(&query.q),
        total: store.len(),
        query: query.q,
    }
}

/// Table rows matching the search box.
///
/// POST /search-addresses
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> impl IntoResponse {
    AddressRowsTemplate {
        addresses: state.addresses().search(&form.search),
    }
}

/// Delete an address.
///
/// DELETE /address/{id}
///
/// Always answers 200 so HTMX swaps out the row; unknown and malformed ids are
/// simply nothing to delete. The body is empty, except when the last stored
/// address was just removed: then it is the "No addresses found" row, which
/// takes the deleted row's place.
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let store = state.addresses();
    let deleted = AddressId::parse(&id).is_some_and(|id| store.delete(id));

    if !deleted {
        tracing::debug!(id = %id, "Delete requested for unknown address");
        return StatusCode::OK.into_response();
    }

    tracing::info!(id = %id, "Address deleted");
    if store.is_empty() {
        AddressRowsTemplate {
            addresses: Vec::new(),
        }
        .into_response()
    } else {
        StatusCode::OK.into_response()
    }
}
