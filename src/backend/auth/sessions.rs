/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT issuance and verification for user sessions.
 * The signing secret and token TTL are injected at construction from the
 * process configuration; nothing here reads the environment or embeds a
 * literal secret.
 */

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::{policy::Role, AuthError};

/// JWT claims structure
///
/// The signed payload: subject id, role, and the issue/expiry pair.
/// A claim is valid only strictly before `exp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Role carried into every gated request
    pub role: Role,
    /// Issued-at (Unix timestamp)
    pub iat: i64,
    /// Expiry (Unix timestamp), `iat` plus the configured TTL
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a user id
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::MalformedToken)
    }
}

/// Token issuer and verifier
///
/// Holds the HS256 encoding/decoding keys derived from the process-wide
/// signing secret, plus the TTL applied to every issued token. Built once
/// at startup and shared read-only across requests.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    /// Create session keys from the configured secret and TTL
    pub fn new(secret: &str, ttl: std::time::Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl.as_secs() as i64),
        }
    }

    /// Issue a signed token for a user
    ///
    /// # Arguments
    /// * `user_id` - Subject of the token
    /// * `role` - Role resolved from the credential at issue time
    ///
    /// # Returns
    /// Encoded JWT string
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(user_id, role, Utc::now())
    }

    /// Issue a token with an explicit issue time
    ///
    /// Split out so expiry behavior is testable without waiting out a TTL.
    pub fn issue_at(
        &self,
        user_id: Uuid,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify a token against the current clock
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against an explicit clock
    ///
    /// Checks run in a fixed order: decode (malformed input fails before
    /// any claim inspection), signature (constant-time HMAC comparison
    /// inside jsonwebtoken), then expiry against `now`. The library's own
    /// expiry validation is disabled so the clock stays an explicit input.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(map_decode_error)?;

        if now.timestamp() >= data.claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(data.claims)
    }
}

/// Map jsonwebtoken decode failures onto the auth error kinds
fn map_decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::InvalidSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::MalformedToken,
    }
}
