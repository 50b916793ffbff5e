use thiserror::Error;

use crate::domain::object_id::ObjectIdError;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for plaintext password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters")]
    TooShort { min: usize },
}

/// Top-level error for all identity-related operations
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid identity ID: {0}")]
    InvalidIdentityId(#[from] ObjectIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("Username is already taken: {0}")]
    UsernameAlreadyExists(String),

    #[error("User with this email already exists: {0}")]
    EmailAlreadyExists(String),

    /// Unknown email and wrong password are deliberately the same error
    #[error("Invalid email or password")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Credential hashing failed: {0}")]
    Hashing(String),

    #[error("Token issuing failed: {0}")]
    TokenIssuing(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
