//! Authentication utilities library
//!
//! Transport-free building blocks for identity handling:
//! - Password hashing (Argon2id, fixed cost)
//! - Identity token issuing and verification (HS256 JWT)
//! - Authentication coordination
//!
//! Services define their own ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Identity Tokens
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 24);
//!
//! let issued = auth.issue_token("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
//! let subject = auth.verify_token(&issued.access_token).unwrap();
//! assert_eq!(subject, "65a1f0c2e4b0a1b2c3d4e5f6");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
