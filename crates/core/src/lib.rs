//! Address Book Core - address records and the address store.
//!
//! This crate owns everything that decides what a valid address is and which
//! addresses match a query:
//! - `web` - Axum front end and JSON API (thin layer over this crate)
//! - `integration-tests` - In-process HTTP tests
//!
//! # Architecture
//!
//! The core crate contains only types and the in-memory store - no I/O, no
//! HTTP. Handlers receive an [`AddressStore`] through application state rather
//! than reaching for a global, so every test can build its own store.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs and the validated address value type
//! - [`store`] - The lock-guarded, insertion-ordered address store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod store;
pub mod types;

pub use store::AddressStore;
pub use types::*;
