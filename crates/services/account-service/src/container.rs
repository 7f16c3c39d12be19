//! Service container - wires repositories, hasher and services together.

use std::sync::Arc;

use common::AppResult;
use domain::{Argon2Hasher, CredentialHasher};
use sea_orm::DatabaseConnection;

use crate::config::AccountServiceConfig;
use crate::repository::{UserRepository, UserStore};
use crate::service::{
    AccountRegistrar, CredentialChecker, CredentialVerifier, RegistrationService,
    SessionAuthenticator, SessionService,
};

/// Account services sharing one user store and one hasher.
#[derive(Clone)]
pub struct AccountServices {
    registration: Arc<dyn RegistrationService>,
    verifier: Arc<dyn CredentialVerifier>,
    sessions: Arc<dyn SessionService>,
}

impl AccountServices {
    /// Create a service container from already built services
    pub fn new(
        registration: Arc<dyn RegistrationService>,
        verifier: Arc<dyn CredentialVerifier>,
        sessions: Arc<dyn SessionService>,
    ) -> Self {
        Self {
            registration,
            verifier,
            sessions,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(
        db: DatabaseConnection,
        config: &AccountServiceConfig,
    ) -> AppResult<Self> {
        config.jwt.validate()?;

        let hashing = &config.hashing;
        let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher::new(
            hashing.memory_kib,
            hashing.iterations,
            hashing.parallelism,
        )?);
        let users: Arc<dyn UserRepository> = Arc::new(UserStore::new(db));

        let registration = Arc::new(AccountRegistrar::new(users.clone(), hasher.clone()));
        let verifier: Arc<dyn CredentialVerifier> =
            Arc::new(CredentialChecker::new(users.clone(), hasher)?);
        let sessions = Arc::new(SessionAuthenticator::new(
            verifier.clone(),
            users,
            config.jwt.clone(),
        ));

        Ok(Self::new(registration, verifier, sessions))
    }

    /// Get registration service
    pub fn registration(&self) -> Arc<dyn RegistrationService> {
        self.registration.clone()
    }

    /// Get credential verifier
    pub fn verifier(&self) -> Arc<dyn CredentialVerifier> {
        self.verifier.clone()
    }

    /// Get session service
    pub fn sessions(&self) -> Arc<dyn SessionService> {
        self.sessions.clone()
    }
}
