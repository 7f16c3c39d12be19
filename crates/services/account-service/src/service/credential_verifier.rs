//! Credential verification callback used by the session layer.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{CredentialHasher, Credentials, UserIdentity};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Plaintext hashed at construction to produce the hash verified for
/// unknown emails
const DUMMY_PASSWORD: &str = "timing-equalization-placeholder";

/// Credential verifier trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Resolve credentials to an identity.
    ///
    /// Returns `Ok(None)` for every kind of mismatch (bad shape, unknown
    /// email, account without password, wrong password) so callers cannot
    /// tell them apart. `Err` is reserved for store failures.
    async fn verify_credentials(&self, credentials: Credentials)
        -> AppResult<Option<UserIdentity>>;
}

/// Concrete implementation of CredentialVerifier.
pub struct CredentialChecker {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    dummy_hash: Arc<str>,
}

impl CredentialChecker {
    /// Create new credential verifier instance.
    ///
    /// The dummy hash is computed here, so every mismatch costs exactly one
    /// verification from the first request on.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> AppResult<Self> {
        let dummy_hash: Arc<str> = Arc::from(hasher.hash(DUMMY_PASSWORD)?);
        Ok(Self {
            users,
            hasher,
            dummy_hash,
        })
    }

    /// Verify on the blocking pool. Without a stored hash, a dummy hash made
    /// with the same parameters is verified instead and the result discarded.
    async fn verify_hash(&self, password: String, stored_hash: Option<String>) -> AppResult<bool> {
        let hasher = self.hasher.clone();
        let dummy_hash = self.dummy_hash.clone();

        tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => hasher.verify(&password, &hash),
            None => {
                let _ = hasher.verify(&password, &dummy_hash);
                false
            }
        })
        .await
        .map_err(|e| AppError::internal(format!("Verification task failed: {}", e)))
    }
}

#[async_trait]
impl CredentialVerifier for CredentialChecker {
    async fn verify_credentials(
        &self,
        credentials: Credentials,
    ) -> AppResult<Option<UserIdentity>> {
        let Ok(credentials) = credentials.validated() else {
            return Ok(None);
        };

        let user = self.users.find_by_email(&credentials.email).await?;
        let stored_hash = user.as_ref().and_then(|u| u.password_hash.clone());

        // SECURITY: always run a verification so response timing does not
        // reveal whether the email is registered.
        let matched = self.verify_hash(credentials.password, stored_hash).await?;

        match user {
            Some(user) if matched => Ok(Some(user.identity())),
            _ => Ok(None),
        }
    }
}
