use thiserror::Error;

/// Error type for JWT operations.
///
/// Every decoding variant means the token is invalid; the split exists
/// for logging, callers must not reveal it to clients.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature does not verify")]
    InvalidSignature,

    #[error("Token signing algorithm does not match the expected algorithm")]
    AlgorithmMismatch,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
