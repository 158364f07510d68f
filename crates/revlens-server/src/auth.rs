//! Password hashing and JWT issuance/verification.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const DEV_SECRET: &str = "dev_secret";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: u64,
    exp: u64,
}

/// HS256 signing and verification keys plus token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    expires_in_secs: u64,
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys")
            .field("secret", &"[redacted]")
            .field("expires_in_secs", &self.expires_in_secs)
            .finish()
    }
}

impl JwtKeys {
    #[must_use]
    pub fn new(secret: &str, expires_in_secs: u64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            expires_in_secs,
        }
    }

    /// Builds keys from the configured `JWT_SECRET`.
    ///
    /// In development a missing secret falls back to a fixed development
    /// value. In non-development envs a missing secret fails startup.
    ///
    /// # Errors
    ///
    /// Returns an error when `secret` is `None` outside development.
    pub fn from_config(
        secret: Option<&str>,
        expires_in_secs: u64,
        is_development: bool,
    ) -> anyhow::Result<Self> {
        match secret {
            Some(secret) => Ok(Self::new(secret, expires_in_secs)),
            None if is_development => {
                tracing::warn!("JWT_SECRET not set; using the development secret");
                Ok(Self::new(DEV_SECRET, expires_in_secs))
            }
            None => anyhow::bail!("JWT_SECRET is required outside development"),
        }
    }

    /// Issue a token whose subject is `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the `jsonwebtoken` error if signing fails.
    pub fn issue(&self, user_id: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let now = jsonwebtoken::get_current_timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.expires_in_secs,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verify a token and return the numeric user id in its subject.
    ///
    /// Returns `None` for bad signatures, expired tokens, and non-numeric subjects.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<i64> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        )
        .ok()?;
        data.claims.sub.parse::<i64>().ok()
    }
}

/// Hash a password into a PHC string with Argon2id and a random salt.
///
/// # Errors
///
/// Returns the `password_hash` error if hashing fails.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Check `password` against a stored PHC hash. Malformed hashes never verify.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_to_user_id() {
        let keys = JwtKeys::new("test-secret", 3600);
        let token = keys.issue(42).expect("issue");
        assert_eq!(keys.verify(&token), Some(42));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtKeys::new("one", 3600).issue(1).expect("issue");
        assert_eq!(JwtKeys::new("two", 3600).verify(&token), None);
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = JwtKeys::new("test-secret", 3600);
        let claims = Claims {
            sub: "7".to_string(),
            iat: 1_000,
            exp: 2_000,
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .expect("encode");
        assert_eq!(keys.verify(&token), None);
    }

    #[test]
    fn non_numeric_subject_is_rejected() {
        let keys = JwtKeys::new("test-secret", 3600);
        let now = jsonwebtoken::get_current_timestamp();
        let claims = Claims {
            sub: "alice".to_string(),
            iat: now,
            exp: now + 60,
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .expect("encode");
        assert_eq!(keys.verify(&token), None);
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert_eq!(JwtKeys::new("s", 60).verify("not.a.jwt"), None);
    }

    #[test]
    fn missing_secret_outside_development_fails() {
        assert!(JwtKeys::from_config(None, 60, false).is_err());
        assert!(JwtKeys::from_config(None, 60, true).is_ok());
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("password123").expect("hash");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("password123", &hash));
        assert!(!verify_password("password124", &hash));
    }

    #[test]
    fn malformed_stored_hash_never_verifies() {
        assert!(!verify_password("password123", "plaintext"));
    }
}
