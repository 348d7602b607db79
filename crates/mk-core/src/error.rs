//! Error type shared by every Memekit crate.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MemeError {
    /// A background completion arrived for a request that has since been
    /// superseded by a newer one.
    #[error("stale image request {request} (latest is {latest})")]
    StaleRequest { request: u32, latest: u32 },

    #[error("not an image: {0}")]
    NotAnImage(String),

    #[error("image load failed: {0}")]
    ImageLoad(String),

    #[error("invalid config: {0}")]
    Config(String),
}

impl From<serde_json::Error> for MemeError {
    fn from(err: serde_json::Error) -> Self {
        MemeError::Config(err.to_string())
    }
}
