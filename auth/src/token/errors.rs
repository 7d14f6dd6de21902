use thiserror::Error;

/// Error type for token issuance and verification.
///
/// Callers facing clients must not distinguish between the verification
/// variants; they exist for tests and server-side diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is malformed")]
    MalformedToken,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is expired")]
    Expired,
}
