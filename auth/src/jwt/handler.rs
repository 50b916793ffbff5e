use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler for encoding and decoding identity tokens.
///
/// Signs with HS256 (HMAC with SHA-256) and accepts nothing else: a token
/// whose header names any other algorithm is rejected before its
/// signature is looked at.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a JWT token against the instant `now`.
    ///
    /// Checks, in order: structure, algorithm, signature, required claims,
    /// and finally `now < exp`. No leeway is applied.
    ///
    /// # Errors
    /// * `Malformed` - Token is not a well-formed JWT for these claims
    /// * `AlgorithmMismatch` - Header algorithm is not HS256
    /// * `InvalidSignature` - Signature does not verify against the secret
    /// * `MissingClaim` - A required claim is absent
    /// * `TokenExpired` - `now` is at or past the expiry
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the caller's clock, not the system clock
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                        JwtError::AlgorithmMismatch
                    }
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::MissingRequiredClaim(claim) => {
                        JwtError::MissingClaim(claim.clone())
                    }
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        if token_data.claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::TimeZone;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::for_subject("user123", issued_at(), 24).unwrap();

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded = handler
            .decode(&token, issued_at() + Duration::hours(1))
            .expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::for_subject("user123", issued_at(), 24).unwrap();
        let token = handler.encode(&claims).unwrap();

        let at_expiry = handler.decode(&token, issued_at() + Duration::hours(24));
        assert_eq!(at_expiry, Err(JwtError::TokenExpired));

        let just_before = handler.decode(
            &token,
            issued_at() + Duration::hours(24) - Duration::seconds(1),
        );
        assert!(just_before.is_ok());
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.decode("invalid.token.here", issued_at());
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .encode(&Claims::for_subject("user123", issued_at(), 24).unwrap())
            .expect("Failed to encode token");

        let result = handler2.decode(&token, issued_at());
        assert_eq!(result, Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_decode_rejects_other_algorithm() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::for_subject("user123", issued_at(), 24).unwrap();

        // Same secret, different HMAC variant
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = handler.decode(&token, issued_at());
        assert_eq!(result, Err(JwtError::AlgorithmMismatch));
    }

    #[test]
    fn test_decode_rejects_missing_claims() {
        #[derive(serde::Serialize)]
        struct SubjectOnly {
            sub: String,
        }

        let handler = JwtHandler::new(SECRET);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &SubjectOnly {
                sub: "user123".to_string(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(handler.decode(&token, issued_at()).is_err());
    }
}
