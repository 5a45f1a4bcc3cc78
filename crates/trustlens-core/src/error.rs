use thiserror::Error;

/// Error taxonomy shared by every TrustLens crate.
///
/// All variants are recoverable at the boundary nearest the user; none of
/// them is allowed to take down the hosting process.
#[derive(Debug, Error)]
pub enum TrustLensError {
    /// Static trust database missing or malformed.
    #[error("Load error: {0}")]
    Load(String),

    /// Resolved domain key has no trust record.
    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    /// Submitted review fields outside the accepted range.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Aggregate store read or write failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TrustLensError {
    fn from(e: serde_json::Error) -> Self {
        TrustLensError::Serialization(e.to_string())
    }
}
