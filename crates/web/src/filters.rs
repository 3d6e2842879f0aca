//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year, for the footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Builds the DOM id of an address table row, the target of HTMX deletes.
///
/// Usage in templates: `{{ record.id()|row_id }}` renders `row-7`.
#[askama::filter_fn]
pub fn row_id(id: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("row-{id}"))
}
