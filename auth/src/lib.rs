//! Authentication infrastructure library
//!
//! Provides the two credential primitives the account service builds on:
//! - Password hashing and verification (Argon2id, tunable time cost)
//! - Signed, time-bounded identity tokens (JWT over HMAC)
//!
//! The service defines its own workflows and error taxonomy on top of these;
//! this crate stays free of any persistence or transport concern.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::default();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenHandler, TokenAlgorithm};
//!
//! let handler = TokenHandler::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     TokenAlgorithm::HS256,
//!     30, // minutes
//! );
//! let token = handler.issue("alice01").unwrap();
//! assert_eq!(handler.verify(&token).unwrap(), "alice01");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenAlgorithm;
pub use token::TokenError;
pub use token::TokenHandler;
