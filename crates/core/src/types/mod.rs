//! Core types for the address book.
//!
//! This module provides type-safe wrappers for the address domain.

pub mod address;
pub mod id;

pub use address::{
    Address, AddressField, AddressRecord, AddressRules, DEFAULT_COUNTRY, FieldError, NewAddress,
    ValidationError,
};
pub use id::*;
