//! Application state for dependency injection.

use std::sync::Arc;

use account_service_lib::infra::Database;
use account_service_lib::service::{RegistrationService, SessionService};
use account_service_lib::AccountServices;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub registration: Arc<dyn RegistrationService>,
    pub sessions: Arc<dyn SessionService>,
    pub database: Database,
}

impl AppState {
    /// Create new app state.
    pub fn new(services: &AccountServices, database: Database) -> Self {
        Self {
            registration: services.registration(),
            sessions: services.sessions(),
            database,
        }
    }
}
