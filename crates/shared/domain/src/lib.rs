//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the sign-up/sign-in validation rules, credential hashing and the user model.

pub mod constants;
pub mod error;
pub mod password;
pub mod submission;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{Argon2Hasher, CredentialHasher};
pub use submission::SubmissionState;
pub use user::{NewUser, RegisteredAccount, User, UserIdentity};
pub use validation::{Credentials, Field, FieldErrors, SignUpRequest, ValidSignUp};
