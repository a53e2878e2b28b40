use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by an issued token.
///
/// Deliberately minimal: the subject it asserts an identity for, when it was
/// issued, and when it stops being valid. Validity is decided purely by
/// signature and clock, never by server-side state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the authenticated username)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Build claims for a subject, expiring `ttl_minutes` after `issued_at`.
    pub fn new(subject: impl Into<String>, issued_at: DateTime<Utc>, ttl_minutes: i64) -> Self {
        let expires_at = issued_at + Duration::minutes(ttl_minutes);

        Self {
            sub: subject.into(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        }
    }
}
