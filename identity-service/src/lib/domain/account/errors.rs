use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Top-level error for account and profile operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    // Domain-level errors
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("User with email {0} was not found")]
    UserNotFound(String),

    #[error("Registration failed: {}", .0.join(" "))]
    RegisterValidation(Vec<String>),

    // Token and credential errors (automatically converted via #[from])
    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        AccountError::Unknown(err.to_string())
    }
}
