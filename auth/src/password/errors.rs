use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash string could not be parsed. Stored hashes are only
    /// ever produced by this crate, so this indicates corruption on the
    /// storage side rather than bad caller input.
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}
