// ABOUTME: JWT-based user authentication and password hashing
// ABOUTME: Handles login token generation, bearer-token validation, and bcrypt password checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Workout Tracker Project

//! # Authentication
//!
//! JWT (HS256) token issuance and validation plus bcrypt password hashing.
//! The rest of the crate never inspects credentials itself: handlers pass the
//! raw `Authorization` header to [`AuthManager::authenticate_header`] and get
//! back the acting user's id or a uniform authentication error.

use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for user tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id
    pub sub: String,
    /// Username, for log readability only
    pub username: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// The authenticated caller, produced by token validation
#[derive(Debug, Clone, Copy)]
pub struct AuthResult {
    /// Id of the acting user
    pub user_id: Uuid,
}

/// Manages JWT token lifecycle for user authentication
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new auth manager from the configured secret
    #[must_use]
    pub fn new(jwt_secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            token_expiry_hours,
        }
    }

    /// Number of hours an issued token stays valid
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// Generate a JWT token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
    }

    /// Validate a JWT token and return its claims
    ///
    /// # Errors
    ///
    /// Returns an error if the token is expired, malformed, or carries an
    /// invalid signature
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!("JWT validation failed: {e}");
                AppError::auth_invalid("Invalid or expired token")
            })?;

        Ok(token_data.claims)
    }

    /// Resolve the acting user from an `Authorization` header value.
    ///
    /// Missing header, non-bearer scheme, bad signature, and expired token
    /// all collapse into the same authentication error.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is absent or the token does not
    /// validate
    pub fn authenticate_header(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let header = auth_header.ok_or_else(AppError::auth_required)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::auth_invalid("Expected bearer token"))?;

        let claims = self.validate_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Token subject is not a valid user id"))?;

        Ok(AuthResult { user_id })
    }
}

/// Hash a plaintext password with bcrypt
///
/// # Errors
///
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// Runs on a blocking thread so hashing cost never stalls the async executor.
///
/// # Errors
///
/// Returns an error if the verification task fails to run
pub async fn verify_password(password: String, password_hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::internal(format!("Password verification error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manager() -> AuthManager {
        AuthManager::new(b"test-secret-key-for-unit-tests", 24)
    }

    #[test]
    fn test_token_round_trip() {
        let manager = test_manager();
        let user = User::new("alice".into(), "hash".into());

        let token = manager.generate_token(&user).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let manager = test_manager();
        let user = User::new("alice".into(), "hash".into());

        let mut token = manager.generate_token(&user).unwrap();
        token.push('x');
        assert!(manager.validate_token(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let user = User::new("alice".into(), "hash".into());
        let token = test_manager().generate_token(&user).unwrap();

        let other = AuthManager::new(b"a-different-secret", 24);
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_authenticate_header_requires_bearer_scheme() {
        let manager = test_manager();
        assert!(manager.authenticate_header(None).is_err());
        assert!(manager.authenticate_header(Some("Basic abc")).is_err());
    }

    #[test]
    fn test_authenticate_header_resolves_user() {
        let manager = test_manager();
        let user = User::new("alice".into(), "hash".into());
        let token = manager.generate_token(&user).unwrap();

        let auth = manager
            .authenticate_header(Some(&format!("Bearer {token}")))
            .unwrap();
        assert_eq!(auth.user_id, user.id);
    }

    #[tokio::test]
    async fn test_password_hash_and_verify() {
        let hash = hash_password("longenough1").unwrap();
        assert!(verify_password("longenough1".into(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong-password".into(), hash).await.unwrap());
    }
}
