use anyhow::Result;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::UserId;

/// Session lifetime. Fixed; there is no refresh flow.
const SESSION_TTL_SECS: i64 = 60 * 60;

/// JWT claims - the entire session state lives in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid, // Subject (user id)
    pub exp: i64,  // Expiration timestamp
    pub iat: i64,  // Issued at timestamp
    pub iss: String, // Issuer
}

/// JWT service - mints and verifies session tokens
///
/// Tokens are self-contained: verification needs only the shared secret,
/// never a session store.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl JwtService {
    /// Create new JWT service with secret and issuer
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create a session token for a user
    ///
    /// Token expires after 1 hour
    pub fn create_token(&self, user_id: UserId) -> Result<String> {
        self.create_token_at(user_id, Utc::now())
    }

    fn create_token_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            sub: user_id.into_uuid(),
            exp: (now + chrono::Duration::seconds(SESSION_TTL_SECS)).timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify a session token and return its subject
    ///
    /// Returns the user id only if the signature checks out, the issuer
    /// matches and the token has not expired. Any failure resolves to
    /// `None` - this runs on every request, including anonymous ones, so
    /// it never errors and has no side effects.
    pub fn verify_token(&self, token: &str) -> Option<UserId> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .ok()
            .map(|data| UserId::from_uuid(data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test_secret_key", "test_issuer".to_string())
    }

    #[test]
    fn create_and_verify_token() {
        let service = service();
        let user_id = UserId::new();

        let token = service.create_token(user_id).unwrap();

        assert_eq!(service.verify_token(&token), Some(user_id));
    }

    #[test]
    fn invalid_token_resolves_to_none() {
        assert_eq!(service().verify_token("invalid_token"), None);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let service1 = JwtService::new("secret1", "test_issuer".to_string());
        let service2 = JwtService::new("secret2", "test_issuer".to_string());

        let token = service1.create_token(UserId::new()).unwrap();

        assert_eq!(service2.verify_token(&token), None);
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let service1 = JwtService::new("secret", "issuer_a".to_string());
        let service2 = JwtService::new("secret", "issuer_b".to_string());

        let token = service1.create_token(UserId::new()).unwrap();

        assert_eq!(service2.verify_token(&token), None);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let service = service();
        let token = service.create_token(UserId::new()).unwrap();

        // Flip a character in the payload segment
        let mut bytes = token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(service.verify_token(&tampered), None);
    }

    #[test]
    fn expired_token_resolves_to_none() {
        let service = service();
        let user_id = UserId::new();

        let issued = Utc::now() - chrono::Duration::hours(2);
        let token = service.create_token_at(user_id, issued).unwrap();

        assert_eq!(service.verify_token(&token), None);
    }

    #[test]
    fn token_expires_one_hour_after_issue() {
        let service = service();
        let token = service.create_token(UserId::new()).unwrap();

        // Decode without expiry validation to inspect the claims
        let mut validation = Validation::default();
        validation.validate_exp = false;
        let claims = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("test_secret_key".as_bytes()),
            &validation,
        )
        .unwrap()
        .claims;

        assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS);
    }
}
