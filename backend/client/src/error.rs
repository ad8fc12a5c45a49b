use menu::ValidationError;
use thiserror::Error;

use crate::view::Surface;

/// Nothing here is fatal to the shop; every variant is logged and the shop
/// keeps running in whatever state it was in.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to load {what}: {reason}")]
    Load { what: &'static str, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to submit {what}: {reason}")]
    Submission { what: &'static str, reason: String },

    #[error("A {0} submission is already in flight")]
    InFlight(&'static str),

    #[error("Persisted storage failed: {0}")]
    Persistence(String),

    #[error("Required surface {0} is not bound")]
    Binding(Surface),

    #[error("Invalid API url {0:?}")]
    InvalidUrl(String),
}
