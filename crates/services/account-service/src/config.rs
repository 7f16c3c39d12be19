//! Account service configuration.

use common::{AppResult, DatabaseConfig, HashingConfig, JwtConfig};

/// Account service configuration.
#[derive(Debug, Clone, Default)]
pub struct AccountServiceConfig {
    /// User store connection
    pub database: DatabaseConfig,
    /// Session token signing
    pub jwt: JwtConfig,
    /// argon2id cost parameters
    pub hashing: HashingConfig,
}

impl AccountServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if `JWT_SECRET` is missing or too short.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env()?,
            hashing: HashingConfig::from_env(),
        })
    }
}
