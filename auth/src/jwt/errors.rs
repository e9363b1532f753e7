use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token issuer is invalid")]
    InvalidIssuer,

    #[error("Token audience is invalid")]
    InvalidAudience,

    #[error("Signing key too short: minimum {min} bytes, got {actual}")]
    WeakKey { min: usize, actual: usize },

    #[error("Token lifetime must be a positive number of days within range, got {0}")]
    InvalidLifetime(i64),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
