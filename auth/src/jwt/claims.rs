use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Identity token claims.
///
/// Every field is mandatory: a token without a subject, issue time or
/// expiry is rejected during decoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject issued at `issued_at` and living `ttl_hours`.
    ///
    /// # Arguments
    /// * `subject` - Identity identifier the token asserts
    /// * `issued_at` - Issue instant
    /// * `ttl_hours` - Hours until the token expires
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry falls outside the representable time range
    pub fn for_subject(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        ttl_hours: i64,
    ) -> Result<Self, JwtError> {
        let expiration = Duration::try_hours(ttl_hours)
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| {
                JwtError::EncodingFailed(format!(
                    "token lifetime of {} hours is out of range",
                    ttl_hours
                ))
            })?;

        Ok(Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        })
    }

    /// Expiry as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Issue time as a timestamp.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token is valid strictly before its expiry; the expiry second
    /// itself is already expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
