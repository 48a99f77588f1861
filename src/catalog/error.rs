use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog {path:?} is unreadable: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("Failed to write catalog {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode catalog: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to read registry list {path:?}: {source}")]
    RegistryList {
        path: PathBuf,
        source: std::io::Error,
    },
}
