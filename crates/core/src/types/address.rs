//! Address value type and its validation rules.
//!
//! [`Address::new`] is the only way to obtain an [`Address`], so every entry
//! point (HTML form, JSON API, tests) goes through the same checks. An
//! [`AddressRecord`] pairs a validated address with the id the store assigned.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::id::AddressId;

/// Country used when the submitter leaves it blank.
pub const DEFAULT_COUNTRY: &str = "USA";

/// Postal code shape: letters and digits, optionally split by single spaces or hyphens.
static POSTAL_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]+(?:[ -][A-Za-z0-9]+)*$").expect("Invalid regex")
});

/// Names of the validated address fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    Street,
    City,
    State,
    ZipCode,
    Country,
}

impl AddressField {
    /// Field name as it appears in forms and JSON bodies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zip_code",
            Self::Country => "country",
        }
    }

    /// Human-readable label for form rendering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Street => "Street Address",
            Self::City => "City",
            Self::State => "State/Province",
            Self::ZipCode => "ZIP/Postal Code",
            Self::Country => "Country",
        }
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The offending field.
    pub field: AddressField,
    /// What is wrong with it, suitable for showing to the submitter.
    pub message: String,
}

/// Structured failure from [`Address::new`].
///
/// Carries one entry per offending field, in form order.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("address failed validation on {} field(s)", .errors.len())]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// All field violations, in form order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Consumes the error and returns the field violations.
    #[must_use]
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// The message for `field`, if that field failed.
    #[must_use]
    pub fn message_for(&self, field: AddressField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Whether `field` failed validation.
    #[must_use]
    pub fn has(&self, field: AddressField) -> bool {
        self.message_for(field).is_some()
    }
}

/// Minimum lengths applied during validation.
///
/// Lengths count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRules {
    pub min_street_len: usize,
    pub min_city_len: usize,
    pub min_state_len: usize,
}

impl AddressRules {
    /// Upper bound for any free-text field.
    pub const MAX_FIELD_LENGTH: usize = 200;

    /// Upper bound for postal codes.
    pub const MAX_ZIP_LENGTH: usize = 10;
}

impl Default for AddressRules {
    fn default() -> Self {
        Self {
            min_street_len: 1,
            min_city_len: 1,
            min_state_len: 1,
        }
    }
}

/// Unvalidated address input, as submitted by a form or JSON body.
///
/// Missing fields deserialize as empty so they are reported by validation
/// instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewAddress {
    #[serde(alias = "street_address")]
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(alias = "postal_code")]
    pub zip_code: String,
    pub country: Option<String>,
}

impl NewAddress {
    /// Build input from borrowed parts. `country` may be `None`.
    #[must_use]
    pub fn new(street: &str, city: &str, state: &str, zip_code: &str, country: Option<&str>) -> Self {
        Self {
            street: street.to_owned(),
            city: city.to_owned(),
            state: state.to_owned(),
            zip_code: zip_code.to_owned(),
            country: country.map(str::to_owned),
        }
    }
}

/// A validated postal address.
///
/// ## Constraints
///
/// - `street`, `city`, `state`: non-empty, at least the configured minimum
///   length, at most 200 characters
/// - `zip_code`: letters and digits optionally separated by single spaces or
///   hyphens, at most 10 characters
/// - `country`: defaults to [`DEFAULT_COUNTRY`] when blank
///
/// Fields are stored exactly as submitted. Emptiness and length checks ignore
/// surrounding whitespace, so `"   "` counts as missing.
///
/// ## Examples
///
/// ```
/// use address_book_core::{Address, NewAddress};
///
/// let address = Address::parse(&NewAddress::new("1 Main St", "Austin", "TX", "78701", None)).unwrap();
/// assert_eq!(address.country(), "USA");
///
/// assert!(Address::parse(&NewAddress::new("", "Austin", "TX", "78701", None)).is_err());
/// assert!(Address::parse(&NewAddress::new("1 Main St", "Austin", "TX", "787#01", None)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address {
    street: String,
    city: String,
    state: String,
    zip_code: String,
    country: String,
}

impl Address {
    /// Validate `input` against `rules`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every field that is empty, too
    /// short, too long, or (for `zip_code`) not shaped like a postal code.
    pub fn new(input: &NewAddress, rules: &AddressRules) -> Result<Self, ValidationError> {
        let mut errors = Vec::new();

        let street = text_field(
            &mut errors,
            AddressField::Street,
            &input.street,
            rules.min_street_len,
        );
        let city = text_field(&mut errors, AddressField::City, &input.city, rules.min_city_len);
        let state = text_field(
            &mut errors,
            AddressField::State,
            &input.state,
            rules.min_state_len,
        );
        let zip_code = zip_field(&mut errors, &input.zip_code);

        let country = match input.country.as_deref() {
            Some(country) if !country.trim().is_empty() => {
                text_field(&mut errors, AddressField::Country, country, 1)
            }
            _ => DEFAULT_COUNTRY.to_owned(),
        };

        if !errors.is_empty() {
            return Err(ValidationError { errors });
        }

        Ok(Self {
            street,
            city,
            state,
            zip_code,
            country,
        })
    }

    /// Validate `input` against the default [`AddressRules`].
    ///
    /// # Errors
    ///
    /// See [`Address::new`].
    pub fn parse(input: &NewAddress) -> Result<Self, ValidationError> {
        Self::new(input, &AddressRules::default())
    }

    #[must_use]
    pub fn street(&self) -> &str {
        &self.street
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    #[must_use]
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Whether `needle` occurs in any field, ignoring case.
    ///
    /// `needle` must already be lowercase; the store lowercases the query once
    /// per search rather than once per record.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        [
            &self.street,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.country,
        ]
        .into_iter()
        .any(|value| value.to_lowercase().contains(needle))
    }
}

/// A stored address with its store-assigned id.
///
/// Serializes flat: `{id, street, city, state, zip_code, country}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AddressRecord {
    id: AddressId,
    #[serde(flatten)]
    address: Address,
}

impl AddressRecord {
    pub(crate) const fn new(id: AddressId, address: Address) -> Self {
        Self { id, address }
    }

    #[must_use]
    pub const fn id(&self) -> AddressId {
        self.id
    }

    #[must_use]
    pub const fn address(&self) -> &Address {
        &self.address
    }

    #[must_use]
    pub fn street(&self) -> &str {
        self.address.street()
    }

    #[must_use]
    pub fn city(&self) -> &str {
        self.address.city()
    }

    #[must_use]
    pub fn state(&self) -> &str {
        self.address.state()
    }

    #[must_use]
    pub fn zip_code(&self) -> &str {
        self.address.zip_code()
    }

    #[must_use]
    pub fn country(&self) -> &str {
        self.address.country()
    }
}

/// Check a required free-text field, recording any violation.
///
/// Returns `raw` unchanged; it is only used when `errors` ends up empty.
fn text_field(
    errors: &mut Vec<FieldError>,
    field: AddressField,
    raw: &str,
    min_len: usize,
) -> String {
    let value = raw.trim();
    let len = value.chars().count();

    let message = if value.is_empty() {
        Some(format!("{field} is required"))
    } else if len < min_len {
        Some(format!("{field} must be at least {min_len} characters"))
    } else if len > AddressRules::MAX_FIELD_LENGTH {
        Some(format!(
            "{field} must be at most {} characters",
            AddressRules::MAX_FIELD_LENGTH
        ))
    } else {
        None
    };

    if let Some(message) = message {
        errors.push(FieldError { field, message });
    }
    raw.to_owned()
}

fn zip_field(errors: &mut Vec<FieldError>, raw: &str) -> String {
    let field = AddressField::ZipCode;
    let value = raw.trim();

    let message = if value.is_empty() {
        Some(format!("{field} is required"))
    } else if value.chars().count() > AddressRules::MAX_ZIP_LENGTH {
        Some(format!(
            "{field} must be at most {} characters",
            AddressRules::MAX_ZIP_LENGTH
        ))
    } else if !POSTAL_CODE_RE.is_match(value) {
        Some(format!(
            "{field} may only contain letters and digits separated by single spaces or hyphens"
        ))
    } else {
        None
    };

    if let Some(message) = message {
        errors.push(FieldError { field, message });
    }
    raw.to_owned()
}
