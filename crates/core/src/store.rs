//! In-memory address store.
//!
//! The store owns every [`AddressRecord`] for the life of the process. It is
//! cheaply cloneable (an `Arc` handle) and shared across request handlers.
//!
//! # Locking
//!
//! Records and the id counter live behind one `RwLock`:
//! - `create` validates outside the lock, then assigns the id and appends in a
//!   single write section, so concurrent creates never share or skip an id
//! - `delete` removes under the write lock
//! - `list_all`, `search`, and `get` take the read lock and run concurrently
//!
//! Every write section leaves the data consistent, so a poisoned lock is
//! recovered rather than propagated.
//!
//! # Search cost
//!
//! `search` is a linear scan over every field of every record. That is fine
//! for a demo-sized book; a large deployment would need an index instead.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::types::{Address, AddressId, AddressRecord, AddressRules, NewAddress, ValidationError};

/// Records in insertion order plus the next id to hand out.
#[derive(Debug)]
struct StoreInner {
    records: Vec<AddressRecord>,
    next_id: i64,
}

/// The address store.
///
/// Ids start at 1, only ever increase, and are never reused after a delete.
#[derive(Debug, Clone)]
pub struct AddressStore {
    inner: Arc<RwLock<StoreInner>>,
    rules: AddressRules,
}

impl Default for AddressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressStore {
    /// Create an empty store using the default validation rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(AddressRules::default())
    }

    /// Create an empty store that validates with `rules`.
    #[must_use]
    pub fn with_rules(rules: AddressRules) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                records: Vec::new(),
                next_id: 1,
            })),
            rules,
        }
    }

    /// The validation rules applied by [`create`](Self::create).
    #[must_use]
    pub const fn rules(&self) -> &AddressRules {
        &self.rules
    }

    /// Validate `input`, assign it the next id, and append it.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] from [`Address::new`] unchanged. Nothing
    /// is stored and no id is consumed on failure.
    pub fn create(&self, input: &NewAddress) -> Result<AddressRecord, ValidationError> {
        let address = Address::new(input, &self.rules)?;

        let mut inner = self.write();
        let id = AddressId::new(inner.next_id);
        inner.next_id += 1;

        let record = AddressRecord::new(id, address);
        inner.records.push(record.clone());
        Ok(record)
    }

    /// All records, in insertion order.
    #[must_use]
    pub fn list_all(&self) -> Vec<AddressRecord> {
        self.read().records.clone()
    }

    /// Records where `query` occurs in any field, ignoring case.
    ///
    /// The query is matched as given, whitespace included; an empty query
    /// returns every record. Results keep insertion order.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<AddressRecord> {
        if query.is_empty() {
            return self.list_all();
        }
        let needle = query.to_lowercase();

        self.read()
            .records
            .iter()
            .filter(|record| record.address().matches(&needle))
            .cloned()
            .collect()
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: AddressId) -> Option<AddressRecord> {
        self.read()
            .records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    /// Remove the record with `id`.
    ///
    /// Returns `false` if no such record exists; absence is not an error.
    pub fn delete(&self, id: AddressId) -> bool {
        let mut inner = self.write();
        match inner.records.iter().position(|record| record.id() == id) {
            Some(index) => {
                inner.records.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
