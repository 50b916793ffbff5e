use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::AuthenticatedSession;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::ports::IdentityRepository;
use crate::domain::identity::ports::IdentityServicePort;

/// Domain service implementation for identity operations.
///
/// Password hashing and verification run on the blocking pool.
pub struct IdentityService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    authenticator: Arc<Authenticator>,
}

impl<IR> IdentityService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hashing and token issuing, built from configuration
    pub fn new(repository: Arc<IR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: Password) -> Result<String, IdentityError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| IdentityError::Hashing(e.to_string()))?
            .map_err(|e| IdentityError::Hashing(e.to_string()))
    }

    async fn verify_password(
        &self,
        password: String,
        stored_hash: String,
    ) -> Result<(), IdentityError> {
        let authenticator = Arc::clone(&self.authenticator);

        let verified = tokio::task::spawn_blocking(move || {
            authenticator.verify_password(&password, &stored_hash)
        })
        .await
        .map_err(|e| IdentityError::Hashing(e.to_string()))?;

        match verified {
            Ok(()) => Ok(()),
            Err(AuthenticationError::InvalidCredentials) => Err(IdentityError::InvalidCredentials),
            Err(e) => Err(IdentityError::Hashing(e.to_string())),
        }
    }

    fn open_session(&self, identity: Identity) -> Result<AuthenticatedSession, IdentityError> {
        let issued = self
            .authenticator
            .issue_token(&identity.id.to_string())
            .map_err(|e| IdentityError::TokenIssuing(e.to_string()))?;

        Ok(AuthenticatedSession {
            identity,
            token: issued.access_token,
            expires_at: issued.expires_at,
        })
    }
}

#[async_trait]
impl<IR> IdentityServicePort for IdentityService<IR>
where
    IR: IdentityRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError> {
        // Early, friendlier conflict; the store's unique constraint is authoritative
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(IdentityError::EmailAlreadyExists(command.email.to_string()));
        }

        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(IdentityError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        let password_hash = self.hash_password(command.password).await?;

        let now = Utc::now();
        let identity = Identity {
            id: IdentityId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(identity).await?;
        tracing::info!(identity_id = %created.id, "Identity registered");

        Ok(created)
    }

    async fn authenticate(&self, command: LoginCommand) -> Result<Identity, IdentityError> {
        let identity = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        self.verify_password(command.password, identity.password_hash.clone())
            .await
            .inspect_err(|e| {
                if !matches!(e, IdentityError::InvalidCredentials) {
                    tracing::error!(identity_id = %identity.id, error = %e, "Password verification failed");
                }
            })?;

        Ok(identity)
    }

    async fn register_user(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticatedSession, IdentityError> {
        let identity = self.register(command).await?;
        self.open_session(identity)
    }

    async fn login_user(
        &self,
        command: LoginCommand,
    ) -> Result<AuthenticatedSession, IdentityError> {
        let identity = self.authenticate(command).await?;
        self.open_session(identity)
    }
}
