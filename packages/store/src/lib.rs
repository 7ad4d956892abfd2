pub mod config;
pub mod error;
pub mod kv;
pub mod models;
pub mod notebook;
pub mod schema;

mod file_store;
mod memory;
pub use file_store::FileStore;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use config::ClientConfig;
pub use error::StoreError;
pub use kv::KeyValueStore;
pub use models::{Author, Hashtag, Profile, Recipe, RecipeDetails, RecipeDraft, VoteRecord, VoteType};
pub use notebook::{LegacyRecipe, Notebook, NotebookStats};
