//! Application state shared across handlers.

use std::sync::Arc;

use address_book_core::AddressStore;

use crate::config::WebConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the process-wide address store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    addresses: AddressStore,
}

impl AppState {
    /// Create a new application state with an empty address store.
    ///
    /// The store validates with the rules from `config`.
    #[must_use]
    pub fn new(config: WebConfig) -> Self {
        let addresses = AddressStore::with_rules(config.address_rules);
        Self::with_store(config, addresses)
    }

    /// Create application state around an existing store.
    #[must_use]
    pub fn with_store(config: WebConfig, addresses: AddressStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, addresses }),
        }
    }

    /// Get a reference to the web configuration.
    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get a reference to the address store.
    #[must_use]
    pub fn addresses(&self) -> &AddressStore {
        &self.inner.addresses
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use address_book_core::{AddressRules, NewAddress};

    use super::*;

    #[test]
    fn test_store_uses_configured_rules() {
        let config = WebConfig {
            address_rules: AddressRules {
                min_state_len: 2,
                ..AddressRules::default()
            },
            ..WebConfig::default()
        };
        let state = AppState::new(config);
        let result = state
            .addresses()
            .create(&NewAddress::new("1 Main St", "Austin", "T", "78701", None));
        assert!(result.is_err());
    }

    #[test]
    fn test_clones_share_store() {
        let state = AppState::new(WebConfig::default());
        let clone = state.clone();
        clone
            .addresses()
            .create(&NewAddress::new("1 Main St", "Austin", "TX", "78701", None))
            .unwrap();
        assert_eq!(state.addresses().len(), 1);
    }
}
