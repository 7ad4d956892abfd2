//! Platform wiring for the key/value store, the configuration and the API client.
//!
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorage`]
//! - **Native**: one file per key under `<data_dir>/whatsyourrecipe/` via [`store::FileStore`]
//! - **WASM without `web`**: an in-memory store

use std::sync::Arc;

use api::ApiClient;
use store::{ClientConfig, KeyValueStore, Notebook};

/// The store shared by the token persistence and the notebook.
pub type SharedStore = Arc<dyn KeyValueStore + Send + Sync>;

#[cfg(not(target_arch = "wasm32"))]
fn data_dir() -> std::path::PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("whatsyourrecipe")
}

/// Create the platform-appropriate store.
pub fn make_store() -> SharedStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Arc::new(store::LocalStorage)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Arc::new(store::MemoryStore::default())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Arc::new(store::FileStore::new(data_dir()))
    }
}

/// Read `whatsyourrecipe.toml` from the data directory. Missing or invalid
/// files fall back to the defaults.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> ClientConfig {
    let path = data_dir().join(ClientConfig::filename());
    match std::fs::read_to_string(&path) {
        Ok(raw) => ClientConfig::from_toml(&raw).unwrap_or_else(|e| {
            tracing::warn!("ignoring invalid {}: {e}", path.display());
            ClientConfig::default()
        }),
        Err(_) => ClientConfig::default(),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn load_config() -> ClientConfig {
    ClientConfig::default()
}

/// API base URL: the `RECIPES_API_URL` environment variable on native builds,
/// then the configured URL, then the page host.
pub fn api_base_url(config: &ClientConfig) -> String {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(url) = std::env::var(store::config::API_URL_ENV) {
            if !url.trim().is_empty() {
                return store::config::resolve_base_url(None, Some(&url));
            }
        }
    }
    let host = crate::browser::page_host();
    config.api_base_url(host.as_deref())
}

/// An API client that persists its token in `store`.
pub fn make_client(config: &ClientConfig, store: SharedStore) -> ApiClient {
    let base_url = api_base_url(config);
    tracing::info!("using recipe API at {base_url}");
    ApiClient::new(base_url).with_token_store(store)
}

/// Open the local recipe notebook.
pub fn make_notebook(store: SharedStore) -> Notebook<SharedStore> {
    Notebook::open(store)
}
