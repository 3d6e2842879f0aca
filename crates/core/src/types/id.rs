//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_i64()`, `parse()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use address_book_core::define_id;
/// define_id!(ContactId);
///
/// let id = ContactId::new(1);
/// assert_eq!(id.as_i64(), 1);
/// assert_eq!(ContactId::parse("1"), Some(id));
/// assert_eq!(ContactId::parse("-1"), None);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }

            /// Parse an ID from untrusted text such as a URL path segment.
            ///
            /// Returns `None` for anything that is not a positive integer, so
            /// callers can treat malformed IDs the same as unknown ones.
            #[must_use]
            pub fn parse(s: &str) -> Option<Self> {
                s.trim().parse::<i64>().ok().filter(|id| *id > 0).map(Self)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(AddressId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(AddressId::parse("42"), Some(AddressId::new(42)));
        assert_eq!(AddressId::parse(" 7 "), Some(AddressId::new(7)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(AddressId::parse(""), None);
        assert_eq!(AddressId::parse("abc"), None);
        assert_eq!(AddressId::parse("0"), None);
        assert_eq!(AddressId::parse("-3"), None);
        assert_eq!(AddressId::parse("1.5"), None);
        assert_eq!(AddressId::parse("99999999999999999999"), None);
    }

    #[test]
    fn test_display_and_conversions() {
        let id = AddressId::from(12);
        assert_eq!(id.to_string(), "12");
        assert_eq!(i64::from(id), 12);
    }

    #[test]
    fn test_ordering() {
        assert!(AddressId::new(1) < AddressId::new(2));
    }
}
