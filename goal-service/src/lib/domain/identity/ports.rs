use async_trait::async_trait;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::AuthenticatedSession;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::Username;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity, storing only the password hash.
    ///
    /// # Arguments
    /// * `command` - Validated username, email, and password
    ///
    /// # Returns
    /// Created identity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError>;

    /// Check an email/password pair.
    ///
    /// # Arguments
    /// * `command` - Raw email and password
    ///
    /// # Returns
    /// Matching identity
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, command: LoginCommand) -> Result<Identity, IdentityError>;

    /// Register and issue a token for the new identity.
    ///
    /// # Errors
    /// Same as `register`, plus `TokenIssuing`
    async fn register_user(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticatedSession, IdentityError>;

    /// Authenticate and issue a token.
    ///
    /// # Errors
    /// Same as `authenticate`, plus `TokenIssuing`
    async fn login_user(&self, command: LoginCommand)
        -> Result<AuthenticatedSession, IdentityError>;
}

/// Credential store: persistence operations for the identity aggregate.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist new identity to storage.
    ///
    /// The store enforces username and email uniqueness itself; a violation
    /// is the authoritative conflict signal.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Retrieve identity by exact username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve identity by exact email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;
}
