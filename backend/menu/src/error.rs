use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Caller contract violations. None of these are fatal; callers log and move on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Ice level {0:?} is not offered")]
    UnknownIceLevel(String),

    #[error("Sugar level {0:?} is not offered")]
    UnknownSugarLevel(String),

    #[error("Topping {0:?} is not offered")]
    UnknownTopping(String),

    #[error("Customization options have not loaded")]
    CatalogUnavailable,

    #[error("No item selected for customization")]
    NoSubject,

    #[error("Cart index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Order has no items")]
    EmptyOrder,

    #[error("Review name is empty")]
    EmptyName,

    #[error("Rating {0} is outside 1-5")]
    Rating(u8),
}
