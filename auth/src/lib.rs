//! Authentication utilities library
//!
//! Provides the authentication infrastructure for the calculations service:
//! - Password hashing (Argon2id)
//! - Bearer token issuance and verification (signed JWTs)
//!
//! The service defines its own domain traits and adapts these implementations,
//! keeping credential handling out of the business logic.
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
//! ## Bearer Tokens
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", 30);
//! let token = tokens.issue("alice").unwrap();
//! let claims = tokens.verify(&token).unwrap();
//! assert_eq!(claims.sub, "alice");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenService;
