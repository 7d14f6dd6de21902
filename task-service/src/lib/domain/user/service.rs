use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::CredentialStore;
use auth::CredentialStoreError;
use auth::StoredCredential;
use chrono::Utc;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

/// Read-only credential view over the user repository.
struct RepositoryCredentials<'a, UR>(&'a UR);

#[async_trait]
impl<'a, UR> CredentialStore for RepositoryCredentials<'a, UR>
where
    UR: UserRepository,
{
    async fn find_credential(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredential>, CredentialStoreError> {
        let user = self
            .0
            .find_by_email(email)
            .await
            .map_err(|e| CredentialStoreError(e.to_string()))?;

        Ok(user.map(|user| StoredCredential {
            identity: user.id.into(),
            password_hash: user.password_hash,
        }))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.expose())?;

        let user = NewUser {
            first_name: command.first_name,
            last_name: command.last_name,
            birth_date: command.birth_date,
            gender: command.gender,
            email: command.email,
            password_hash,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, UserError> {
        let store = RepositoryCredentials(self.repository.as_ref());

        self.authenticator
            .login(&store, email, password, Utc::now())
            .await
            .map_err(UserError::from)
    }
}
