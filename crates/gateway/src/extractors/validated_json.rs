//! JSON extractors with uniform error bodies.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use common::AppError;
use domain::{Credentials, FieldErrors};

/// JSON extractor whose rejections use the shared error body.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        Ok(JsonBody(value))
    }
}

/// Request bodies that can check and normalize themselves.
pub trait RequestRules: Sized {
    fn apply_rules(self) -> Result<Self, FieldErrors>;
}

impl RequestRules for Credentials {
    fn apply_rules(self) -> Result<Self, FieldErrors> {
        self.validated()
    }
}

/// JSON extractor that validates and normalizes the payload.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + RequestRules,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;

        // All field errors, not just the first
        let value = value.apply_rules().map_err(AppError::Validation)?;

        Ok(ValidatedJson(value))
    }
}
