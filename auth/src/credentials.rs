use async_trait::async_trait;
use thiserror::Error;

use crate::identity::Identity;
use crate::password::PasswordHasher;

/// Credential material a store holds for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredential {
    pub identity: Identity,
    pub password_hash: String,
}

/// Failure of the backing store itself, as opposed to a failed login.
#[derive(Debug, Clone, Error)]
#[error("Credential store unavailable: {0}")]
pub struct CredentialStoreError(pub String);

/// Lookup of stored credentials by email.
///
/// Implemented by whatever persists user accounts; the auth core only reads.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find the credential registered under `email` (exact match).
    ///
    /// # Returns
    /// Optional credential (None if no account uses this email)
    ///
    /// # Errors
    /// * `CredentialStoreError` - The store could not be read
    async fn find_credential(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredential>, CredentialStoreError>;
}

#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<CredentialStoreError> for CredentialError {
    fn from(err: CredentialStoreError) -> Self {
        CredentialError::StoreUnavailable(err.0)
    }
}

/// Check a login attempt against stored credentials.
///
/// An unknown email still pays for one Argon2 verification, so the two
/// failure cases also take the same time.
///
/// # Arguments
/// * `store` - Credential lookup
/// * `hasher` - Hasher used to compare the attempt with the stored hash
/// * `email` - Email the user logs in with
/// * `password` - Plaintext password attempt
///
/// # Returns
/// Identity of the account on success
///
/// # Errors
/// * `InvalidCredentials` - No such email, or password mismatch
/// * `StoreUnavailable` - Store lookup failed
pub async fn validate_login<S>(
    store: &S,
    hasher: &PasswordHasher,
    email: &str,
    password: &str,
) -> Result<Identity, CredentialError>
where
    S: CredentialStore + ?Sized,
{
    let Some(credential) = store.find_credential(email).await? else {
        hasher.verify_dummy(password);
        return Err(CredentialError::InvalidCredentials);
    };

    if !hasher.verify(&credential.password_hash, password) {
        return Err(CredentialError::InvalidCredentials);
    }

    Ok(credential.identity)
}
