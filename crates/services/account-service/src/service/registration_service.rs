//! Account registration - validates a sign-up and creates the user record.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use common::{AppError, AppResult};
use domain::{
    CredentialHasher, NewUser, RegisteredAccount, SignUpRequest, MSG_ACCOUNT_EXISTS,
};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Registration service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account from a sign-up submission.
    ///
    /// Outcomes: `Ok` with the new user id, `AppError::Validation` with the
    /// field errors, or `AppError::Conflict` when the email is taken. Nothing
    /// is written unless validation and the uniqueness check both pass.
    async fn register_account(&self, request: SignUpRequest) -> AppResult<RegisteredAccount>;
}

/// Concrete implementation of RegistrationService.
pub struct AccountRegistrar {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AccountRegistrar {
    /// Create new registration service instance
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }

    /// argon2 is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: String) -> AppResult<String> {
        let hasher = self.hasher.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::internal(format!("Hashing task failed: {}", e)))??;
        Ok(hash)
    }
}

#[async_trait]
impl RegistrationService for AccountRegistrar {
    async fn register_account(&self, request: SignUpRequest) -> AppResult<RegisteredAccount> {
        let sign_up = request.validated()?;

        if self.users.find_by_email(&sign_up.email).await?.is_some() {
            warn!("Sign-up rejected: email already registered");
            return Err(AppError::conflict(MSG_ACCOUNT_EXISTS));
        }

        let password_hash = self.hash_password(sign_up.password).await?;

        let user = self
            .users
            .create(NewUser {
                first_name: sign_up.first_name,
                last_name: sign_up.last_name,
                email: sign_up.email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "Account created");
        Ok(RegisteredAccount::new(user.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use chrono::Utc;
    use domain::{Argon2Hasher, Field, User, MSG_ACCOUNT_CREATED, MSG_PASSWORDS_DO_NOT_MATCH};
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn hasher() -> Arc<dyn CredentialHasher> {
        Arc::new(Argon2Hasher::new(1024, 1, 1).unwrap())
    }

    fn request(email: &str, password: &str, confirm: &str) -> SignUpRequest {
        SignUpRequest {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    fn existing_user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            password_hash: Some("hash".to_string()),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("test@example.com"))
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|new_user| {
                new_user.email == "test@example.com"
                    && new_user.first_name == "John"
                    && new_user.password_hash != "Password123"
                    && new_user.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: Uuid::new_v4(),
                    first_name: new_user.first_name,
                    last_name: new_user.last_name,
                    email: new_user.email,
                    password_hash: Some(new_user.password_hash),
                    created_at: Utc::now(),
                })
            });

        let service = AccountRegistrar::new(Arc::new(repo), hasher());
        let account = service
            .register_account(request("Test@Example.com", "Password123", "Password123"))
            .await
            .unwrap();

        assert_eq!(account.message, MSG_ACCOUNT_CREATED);
    }

    #[tokio::test]
    async fn test_register_conflict_has_no_side_effects() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(existing_user(email))));
        repo.expect_create().times(0);

        let service = AccountRegistrar::new(Arc::new(repo), hasher());
        let result = service
            .register_account(request("test@example.com", "Password123", "Password123"))
            .await;

        match result {
            Err(AppError::Conflict(msg)) => assert_eq!(msg, MSG_ACCOUNT_EXISTS),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_validation_failure_touches_nothing() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(0);
        repo.expect_create().times(0);

        let service = AccountRegistrar::new(Arc::new(repo), hasher());
        let result = service
            .register_account(request("test@example.com", "Password123", "Password456"))
            .await;

        match result {
            Err(AppError::Validation(errors)) => {
                assert_eq!(errors.get(Field::ConfirmPassword), [MSG_PASSWORDS_DO_NOT_MATCH]);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_collects_all_field_errors() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(0);
        repo.expect_create().times(0);

        let service = AccountRegistrar::new(Arc::new(repo), hasher());
        let err = service
            .register_account(request("bad", "weak", "weak"))
            .await
            .unwrap_err();

        let errors = err.field_errors().unwrap();
        assert!(errors.contains(Field::Email));
        assert!(errors.contains(Field::Password));
    }

    #[tokio::test]
    async fn test_register_lost_race_is_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|_| Err(AppError::conflict(MSG_ACCOUNT_EXISTS)));

        let service = AccountRegistrar::new(Arc::new(repo), hasher());
        let result = service
            .register_account(request("test@example.com", "Password123", "Password123"))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_store_failure_is_infrastructure() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(AppError::internal("connection refused")));
        repo.expect_create().times(0);

        let service = AccountRegistrar::new(Arc::new(repo), hasher());
        let err = service
            .register_account(request("test@example.com", "Password123", "Password123"))
            .await
            .unwrap_err();

        assert!(err.is_infrastructure());
    }
}
