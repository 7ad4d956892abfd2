use thiserror::Error;

/// Errors raised by the storage backends and the recipe notebook.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("local storage is unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid file format. Please select a valid JSON file.")]
    NotAnArray,

    #[error("No recipes to export!")]
    NothingToExport,

    #[error("recipe {0} not found")]
    NotFound(String),
}
