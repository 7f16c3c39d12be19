//! Authentication handlers: sign-up, sign-in and session lookup.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use common::AppResult;
use domain::{Credentials, SignUpRequest, UserIdentity};

use crate::extractors::{JsonBody, ValidatedJson};
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Sign-up response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    /// Always true
    pub success: bool,
    #[schema(example = "Account created successfully")]
    pub message: String,
    /// Identifier of the created account
    pub user_id: Uuid,
}

/// Sign-in response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
    pub user: UserIdentity,
}

/// Create authentication routes (public)
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up))
        .route("/signin", post(sign_in))
}

/// Create session routes (Bearer token required)
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/session", get(session))
}

/// Create an account
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Authentication",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = SignUpResponse),
        (status = 400, description = "Validation error with per-field messages"),
        (status = 409, description = "An account with this email already exists")
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SignUpRequest>,
) -> AppResult<(StatusCode, Json<SignUpResponse>)> {
    let account = state.registration.register_account(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            success: true,
            message: account.message,
            user_id: account.user_id,
        }),
    ))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = "Authentication",
    request_body = Credentials,
    responses(
        (status = 200, description = "Signed in", body = SignInResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> AppResult<Json<SignInResponse>> {
    let token = state.sessions.sign_in(credentials).await?;

    Ok(Json(SignInResponse {
        access_token: token.access_token,
        token_type: token.token_type,
        expires_in: token.expires_in,
        user: token.user,
    }))
}

/// Get the identity behind the current session
#[utoipa::path(
    get,
    path = "/auth/session",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current identity", body = UserIdentity),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn session(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserIdentity>> {
    let identity = state.sessions.current_user(current_user.id).await?;
    Ok(Json(identity))
}
