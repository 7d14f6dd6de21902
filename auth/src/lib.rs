//! Authentication core
//!
//! Provides the authentication building blocks the task service protects its
//! routes with:
//! - Password hashing (Argon2id)
//! - Signed bearer tokens (HS256, 24 hour lifetime)
//! - `Authorization: Bearer <token>` header parsing
//! - Login validation against a pluggable credential store
//!
//! All state is held in values built at startup; the signing secret is passed
//! in explicitly and never read from globals.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password1").unwrap();
//! assert!(hasher.verify(&hash, "my_password1"));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Identity, TokenCodec};
//! use chrono::Utc;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let now = Utc::now();
//! let token = codec.issue(Identity(42), now).unwrap();
//! assert_eq!(codec.verify(&token, now).unwrap(), Identity(42));
//! ```
//!
//! ## Bearer Header
//! ```
//! use auth::{Authenticator, Identity};
//! use chrono::Utc;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//! let token = auth.issue_token(Identity(7), Utc::now()).unwrap();
//! let header = format!("Bearer {}", token);
//! let identity = auth.authenticate_bearer(Some(&header), Utc::now()).unwrap();
//! assert_eq!(identity, Identity(7));
//! ```

pub mod authenticator;
pub mod bearer;
pub mod credentials;
pub mod identity;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use bearer::BearerError;
pub use credentials::CredentialError;
pub use credentials::CredentialStore;
pub use credentials::CredentialStoreError;
pub use credentials::StoredCredential;
pub use identity::Identity;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenClaims;
pub use token::TokenCodec;
pub use token::TokenError;
