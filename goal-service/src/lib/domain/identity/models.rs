use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::identity::errors::EmailError;
use crate::domain::identity::errors::PasswordPolicyError;
use crate::domain::identity::errors::UsernameError;
use crate::domain::object_id::ObjectId;
use crate::domain::object_id::ObjectIdError;

/// Identity aggregate entity.
///
/// Represents a registered user. `password_hash` stays inside the domain
/// and storage layers; no outward representation carries it.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub ObjectId);

impl IdentityId {
    /// Generate a new identity ID.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse an identity ID from its 24-character hex form.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not 24 hex characters
    pub fn from_string(s: &str) -> Result<Self, ObjectIdError> {
        ObjectId::parse_str(s).map(IdentityId)
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Username value type
///
/// Ensures username is 3-30 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 30;

    /// Create a new valid username.
    ///
    /// Length is counted in characters, not bytes.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 30 characters
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(username))
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plaintext password accepted for registration.
///
/// Never stored or logged; `Debug` is redacted.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// Check the password against the registration policy.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Command to register a new identity with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterCommand {
    pub fn new(username: Username, email: EmailAddress, password: Password) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Command to authenticate with email and password.
///
/// Inputs are deliberately unvalidated: a malformed email is just another
/// failed login.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Identity paired with a freshly issued token.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub identity: Identity,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds() {
        assert!(Username::new("abc".to_string()).is_ok());
        assert!(Username::new("a".repeat(30)).is_ok());
        assert_eq!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { min: 3, actual: 2 })
        );
        assert_eq!(
            Username::new("a".repeat(31)),
            Err(UsernameError::TooLong {
                max: 30,
                actual: 31
            })
        );
    }

    #[test]
    fn test_username_counts_characters() {
        // 3 characters, 6 bytes
        assert!(Username::new("äöü".to_string()).is_ok());
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("a@x.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("".to_string()).is_err());
    }

    #[test]
    fn test_long_email_accepted() {
        let email = format!(
            "{}@{}.{}.{}.com",
            "a".repeat(64),
            "b".repeat(63),
            "c".repeat(63),
            "d".repeat(63)
        );
        assert!(email.len() > 255);
        assert!(EmailAddress::new(email).is_ok());
    }

    #[test]
    fn test_password_policy() {
        assert!(Password::new("secret1".to_string()).is_ok());
        assert!(Password::new("123456".to_string()).is_ok());
        assert_eq!(
            Password::new("12345".to_string()).map(|_| ()),
            Err(PasswordPolicyError::TooShort { min: 6 })
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("secret1".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("secret1"));

        let login = LoginCommand {
            email: "a@x.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(!format!("{:?}", login).contains("secret1"));
    }

    #[test]
    fn test_identity_id_round_trip() {
        let id = IdentityId::new();
        assert_eq!(IdentityId::from_string(&id.to_string()), Ok(id));
        assert!(IdentityId::from_string("nope").is_err());
    }
}
