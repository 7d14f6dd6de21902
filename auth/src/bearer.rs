use thiserror::Error;

/// Authorization scheme prefix, case-sensitive with exactly one space.
pub const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BearerError {
    #[error("Authorization header format must be Bearer <token>")]
    MissingOrMalformedHeader,
}

/// Extract the token from a raw `Authorization` header value.
///
/// # Errors
/// * `MissingOrMalformedHeader` - Header absent, wrong scheme, or empty token
pub fn extract_token(header: Option<&str>) -> Result<&str, BearerError> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
        .ok_or(BearerError::MissingOrMalformedHeader)
}
