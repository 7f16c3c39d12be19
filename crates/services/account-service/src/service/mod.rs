//! Service layer - registration, credential verification and sessions.

mod credential_verifier;
mod registration_service;
mod session_service;

pub use credential_verifier::{CredentialChecker, CredentialVerifier};
pub use registration_service::{AccountRegistrar, RegistrationService};
pub use session_service::{Claims, SessionAuthenticator, SessionService, SessionToken};

#[cfg(any(test, feature = "test-utils"))]
pub use credential_verifier::MockCredentialVerifier;
#[cfg(any(test, feature = "test-utils"))]
pub use registration_service::MockRegistrationService;
#[cfg(any(test, feature = "test-utils"))]
pub use session_service::MockSessionService;
