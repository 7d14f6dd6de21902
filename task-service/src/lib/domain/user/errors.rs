use auth::AuthenticationError;
use auth::PasswordError;
use thiserror::Error;

/// Error for required name fields
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Field '{0}' is required")]
    Empty(&'static str),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password policy violations at registration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password must contain letters and digits")]
    MissingDigit,

    #[error("Passwords do not match")]
    ConfirmationMismatch,
}

/// Error for birth date parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BirthDateError {
    #[error("Birth date must use the DD.MM.YYYY format, got '{0}'")]
    InvalidFormat(String),
}

/// Error for gender parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenderError {
    #[error("Unknown gender '{0}' (expected 'male' or 'female')")]
    Unknown(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid birth date: {0}")]
    InvalidBirthDate(#[from] BirthDateError),

    #[error("Invalid gender: {0}")]
    InvalidGender(#[from] GenderError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    // Infrastructure errors
    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<AuthenticationError> for UserError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials | AuthenticationError::Bearer(_) => {
                UserError::InvalidCredentials
            }
            AuthenticationError::StoreUnavailable(msg) => UserError::DatabaseError(msg),
            AuthenticationError::Token(e) => UserError::TokenIssuance(e.to_string()),
        }
    }
}
