use chrono::DateTime;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing and identity tokens.
///
/// Built once from immutable settings (signing secret, token lifetime) and
/// shared read-only afterwards. Verification is a local cryptographic check
/// plus a clock read; nothing is stored server-side.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl_hours: i64,
}

/// A freshly issued identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Signed JWT access token
    pub access_token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl_hours` - Lifetime of every issued token
    pub fn new(jwt_secret: &[u8], token_ttl_hours: i64) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl_hours,
        }
    }

    /// Lifetime of issued tokens, in hours.
    pub fn token_ttl_hours(&self) -> i64 {
        self.token_ttl_hours
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }

    /// Issue a token for `subject`, valid from now for the configured lifetime.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        self.issue_token_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as if the current time were `now`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry is out of range or signing failed
    pub fn issue_token_at(
        &self,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_subject(subject, now, self.token_ttl_hours)?;
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            issued_at: claims.issued_at().unwrap_or(now),
            expires_at: claims.expires_at().unwrap_or(now),
        })
    }

    /// Verify a token and return the subject it asserts.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, forged, uses another algorithm, or expired
    pub fn verify_token(&self, token: &str) -> Result<String, JwtError> {
        self.verify_token_at(token, Utc::now())
    }

    /// Verify a token against the instant `now`.
    ///
    /// # Errors
    /// * `JwtError` - Token is malformed, forged, uses another algorithm, or expired
    pub fn verify_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        self.jwt_handler.decode(token, now).map(|claims| claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::TimeZone;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn flip_first_signature_char(token: &str) -> String {
        let signature_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.as_bytes().to_vec();
        bytes[signature_start] = if bytes[signature_start] == b'A' { b'B' } else { b'A' };
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_verify_password_success() {
        let authenticator = Authenticator::new(SECRET, 24);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert!(authenticator.verify_password("my_password", &hash).is_ok());
    }

    #[test]
    fn test_verify_password_invalid_password() {
        let authenticator = Authenticator::new(SECRET, 24);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.verify_password("wrong_password", &hash);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_issue_and_verify_token() {
        let authenticator = Authenticator::new(SECRET, 24);

        let issued = authenticator
            .issue_token("65a1f0c2e4b0a1b2c3d4e5f6")
            .expect("Failed to issue token");

        assert_eq!(issued.expires_at - issued.issued_at, Duration::hours(24));

        let subject = authenticator
            .verify_token(&issued.access_token)
            .expect("Failed to verify token");
        assert_eq!(subject, "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_token_valid_until_expiry() {
        let authenticator = Authenticator::new(SECRET, 2);
        let issued_at = Utc.with_ymd_and_hms(2024, 5, 10, 9, 30, 0).unwrap();

        let issued = authenticator.issue_token_at("user123", issued_at).unwrap();

        for offset in [Duration::zero(), Duration::minutes(90), Duration::seconds(7199)] {
            assert_eq!(
                authenticator
                    .verify_token_at(&issued.access_token, issued_at + offset)
                    .unwrap(),
                "user123"
            );
        }

        for offset in [Duration::hours(2), Duration::hours(3), Duration::days(30)] {
            assert_eq!(
                authenticator.verify_token_at(&issued.access_token, issued_at + offset),
                Err(JwtError::TokenExpired)
            );
        }
    }

    #[test]
    fn test_issue_token_with_huge_lifetime_fails() {
        let authenticator = Authenticator::new(SECRET, 10_000_000_000);

        assert!(matches!(
            authenticator.issue_token("user123"),
            Err(JwtError::EncodingFailed(_))
        ));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let authenticator = Authenticator::new(SECRET, 24);
        let issued = authenticator.issue_token("user123").unwrap();

        let tampered = flip_first_signature_char(&issued.access_token);

        assert!(authenticator.verify_token(&tampered).is_err());
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let issuer = Authenticator::new(b"another_secret_key_at_least_32_bytes", 24);
        let verifier = Authenticator::new(SECRET, 24);

        let issued = issuer.issue_token("user123").unwrap();

        assert_eq!(
            verifier.verify_token(&issued.access_token),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_verify_invalid_token() {
        let authenticator = Authenticator::new(SECRET, 24);

        let result = authenticator.verify_token("invalid.token.here");
        assert!(result.is_err());
    }
}
