use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are kept distinguishable for diagnostics even
/// though callers typically collapse all of them into a single
/// "unauthorized" outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Signature does not match, including tokens that claim a different
    /// signing algorithm than the one this process is configured with.
    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    /// The token's structural encoding could not be parsed at all.
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
