//! # Key-value persistence
//!
//! [`KeyValueStore`] is the small synchronous interface the client persists
//! through: the API token under `"access_token"` and the notebook under
//! `"coffeeRecipes"`. Values are strings (JSON documents or raw tokens).
//!
//! | Backend | Module | Used on |
//! |---------|--------|---------|
//! | [`MemoryStore`](crate::MemoryStore) | `memory` | tests, fallback when nothing else is available |
//! | [`FileStore`](crate::FileStore) | `file_store` | native builds |
//! | `LocalStorage` | `local` | the browser (`web` feature on wasm32) |

use std::sync::Arc;

use crate::error::StoreError;

/// Synchronous string store keyed by name.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
