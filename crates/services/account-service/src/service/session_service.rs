//! Session service - issues and checks JWT session tokens.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use common::{AppError, AppResult, JwtConfig};
use domain::{Credentials, UserIdentity, TOKEN_TYPE_BEARER};

use super::CredentialVerifier;
use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token issued after a successful sign-in
#[derive(Debug, Clone)]
pub struct SessionToken {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token expiration time in seconds
    pub expires_in: i64,
    /// Identity the token was issued for
    pub user: UserIdentity,
}

/// Session service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Verify credentials and issue a session token.
    ///
    /// Any mismatch yields `AppError::InvalidCredentials`.
    async fn sign_in(&self, credentials: Credentials) -> AppResult<SessionToken>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Re-read the identity behind a session from the store
    async fn current_user(&self, user_id: Uuid) -> AppResult<UserIdentity>;
}

/// Concrete implementation of SessionService.
pub struct SessionAuthenticator {
    verifier: Arc<dyn CredentialVerifier>,
    users: Arc<dyn UserRepository>,
    jwt: JwtConfig,
}

impl SessionAuthenticator {
    /// Create new session service instance
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        users: Arc<dyn UserRepository>,
        jwt: JwtConfig,
    ) -> Self {
        Self {
            verifier,
            users,
            jwt,
        }
    }

    /// Generate JWT token for an identity
    fn generate_token(&self, user: UserIdentity) -> AppResult<SessionToken> {
        let now = Utc::now();
        let lifetime = Duration::try_hours(self.jwt.expiration_hours)
            .ok_or_else(|| AppError::internal("JWT expiration out of range"))?;
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| AppError::internal("JWT expiration out of range"))?;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret_bytes()),
        )?;

        Ok(SessionToken {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: lifetime.num_seconds(),
            user,
        })
    }
}

#[async_trait]
impl SessionService for SessionAuthenticator {
    async fn sign_in(&self, credentials: Credentials) -> AppResult<SessionToken> {
        match self.verifier.verify_credentials(credentials).await? {
            Some(identity) => {
                info!(user_id = %identity.id, "Signed in");
                self.generate_token(identity)
            }
            None => {
                warn!("Sign-in rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn current_user(&self, user_id: Uuid) -> AppResult<UserIdentity> {
        // Fresh data, not the names embedded at sign-in
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        Ok(UserIdentity::from(user))
    }
}
