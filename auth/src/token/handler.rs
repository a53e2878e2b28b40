use std::str::FromStr;

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
use super::errors::TokenError;

/// Signing algorithm identifier, restricted to the HMAC family.
///
/// The signing key is a shared secret, so asymmetric algorithms are not
/// meaningful here. Parsed once at startup from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAlgorithm {
    HS256,
    HS384,
    HS512,
}

impl FromStr for TokenAlgorithm {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(Self::HS256),
            "HS384" => Ok(Self::HS384),
            "HS512" => Ok(Self::HS512),
            other => Err(TokenError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl From<TokenAlgorithm> for Algorithm {
    fn from(alg: TokenAlgorithm) -> Self {
        match alg {
            TokenAlgorithm::HS256 => Algorithm::HS256,
            TokenAlgorithm::HS384 => Algorithm::HS384,
            TokenAlgorithm::HS512 => Algorithm::HS512,
        }
    }
}

/// Issues and verifies signed, time-bounded identity tokens.
///
/// The algorithm is pinned at construction: verification only ever accepts
/// tokens signed with the configured algorithm, regardless of what the
/// token's own header claims. Key and algorithm are process-wide and never
/// rotate within a process lifetime.
pub struct TokenHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl_minutes: i64,
}

impl TokenHandler {
    /// Create a new token handler.
    ///
    /// # Arguments
    /// * `secret` - HMAC signing secret (at least 32 bytes for HS256)
    /// * `algorithm` - Signing algorithm, pinned for both directions
    /// * `ttl_minutes` - Lifetime of issued tokens
    pub fn new(secret: &[u8], algorithm: TokenAlgorithm, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: algorithm.into(),
            ttl_minutes,
        }
    }

    /// Issue a token asserting `subject`, valid from now for the configured TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let claims = Claims::new(subject, Utc::now(), self.ttl_minutes);
        self.encode(&claims)
    }

    /// Sign an explicit claim set.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return the subject it asserts.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signature mismatch or algorithm confusion
    /// * `Expired` - Current time is past the token's expiration
    /// * `Malformed` - The token structure cannot be parsed
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    ErrorKind::InvalidSignature
                    | ErrorKind::InvalidAlgorithm
                    | ErrorKind::InvalidAlgorithmName => TokenError::InvalidSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        Ok(token_data.claims.sub)
    }
}
