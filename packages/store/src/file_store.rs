//! # Filesystem-backed key-value store
//!
//! [`FileStore`] persists each key as one file under a base directory. It is
//! used by native builds so the session token and the notebook survive
//! restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── access_token       # raw bearer token
//! └── coffeeRecipes      # notebook JSON array
//! ```
//!
//! ## Platform data directories
//!
//! Use [`dirs::data_dir()`] joined with `whatsyourrecipe` for the base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/whatsyourrecipe/` |
//! | Linux | `~/.local/share/whatsyourrecipe/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\whatsyourrecipe\` |

use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// Filesystem-backed KeyValueStore for native persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers, but keep them from escaping the base.
        let name: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.base.join(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Err(e) = std::fs::remove_file(self.key_path(key)) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("failed to remove {key}: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!("whatsyourrecipe_test_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let store = FileStore::new(dir.clone());
        store.set("coffeeRecipes", "[]").unwrap();

        // Re-open from same directory
        let store2 = FileStore::new(dir.clone());
        assert_eq!(store2.get("coffeeRecipes").as_deref(), Some("[]"));

        store2.remove("coffeeRecipes");
        assert!(store.get("coffeeRecipes").is_none());
        // Removing a missing key is a no-op
        store2.remove("coffeeRecipes");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_keys_stay_inside_base() {
        let store = FileStore::new(PathBuf::from("/tmp/base"));
        assert_eq!(store.key_path("../etc/passwd"), PathBuf::from("/tmp/base/___etc_passwd"));
    }
}
