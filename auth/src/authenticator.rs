use chrono::DateTime;
use chrono::Utc;

use crate::bearer::extract_token;
use crate::bearer::BearerError;
use crate::credentials::validate_login;
use crate::credentials::CredentialError;
use crate::credentials::CredentialStore;
use crate::identity::Identity;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Authentication coordinator combining password verification and token handling.
///
/// Owns the process-wide signing secret (through its [`TokenCodec`]); build it
/// once at startup and share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Bearer error: {0}")]
    Bearer(#[from] BearerError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl From<CredentialError> for AuthenticationError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidCredentials => AuthenticationError::InvalidCredentials,
            CredentialError::StoreUnavailable(msg) => AuthenticationError::StoreUnavailable(msg),
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for token signing
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(token_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(token_secret),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify login credentials against `store` and issue a token.
    ///
    /// # Arguments
    /// * `store` - Credential lookup by email
    /// * `email` - Login email
    /// * `password` - Plaintext password attempt
    /// * `now` - Issuance time
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `StoreUnavailable` - Credential lookup failed
    /// * `Token` - Token generation failed
    pub async fn login<S>(
        &self,
        store: &S,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AuthenticationError>
    where
        S: CredentialStore + ?Sized,
    {
        let identity = validate_login(store, &self.password_hasher, email, password).await?;

        Ok(self.token_codec.issue(identity, now)?)
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, identity: Identity, now: DateTime<Utc>) -> Result<String, TokenError> {
        self.token_codec.issue(identity, now)
    }

    /// Verify a token and return the identity it carries.
    pub fn verify_token(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        self.token_codec.verify(token, now)
    }

    /// Resolve the identity behind a raw `Authorization` header value.
    ///
    /// # Errors
    /// * `Bearer` - Header missing or not `Bearer <token>`
    /// * `Token` - Token malformed, badly signed, or expired
    pub fn authenticate_bearer(
        &self,
        header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Identity, AuthenticationError> {
        let token = extract_token(header)?;

        Ok(self.token_codec.verify(token, now)?)
    }
}
