//! Integration tests for API endpoints.
//!
//! The router runs against the real services over an in-memory SQLite
//! database, driven request by request through `oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use utoipa::OpenApi;

use account_service_lib::config::AccountServiceConfig;
use account_service_lib::infra::Database;
use account_service_lib::AccountServices;
use common::{DatabaseConfig, HashingConfig, JwtConfig};
use gateway_lib::openapi::ApiDoc;
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;

// =============================================================================
// Test Setup
// =============================================================================

async fn test_app() -> Router {
    let config = AccountServiceConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test-secret-key-for-testing-only-32chars".to_string(),
            expiration_hours: 24,
        },
        hashing: HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
    };

    let db = Database::connect(&config.database).await.unwrap();
    let services = AccountServices::from_connection(db.get_connection(), &config).unwrap();
    create_router(AppState::new(&services, db))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn sign_up_body(email: &str, password: &str, confirm: &str) -> Value {
    json!({
        "firstName": "John",
        "lastName": "Doe",
        "email": email,
        "password": password,
        "confirmPassword": confirm,
    })
}

async fn register(app: &Router) {
    let (status, _) = send(
        app,
        post_json(
            "/auth/signup",
            sign_up_body("test@example.com", "Password123", "Password123"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

// =============================================================================
// Sign-up
// =============================================================================

#[tokio::test]
async fn test_sign_up_success() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/auth/signup",
            sign_up_body("test@example.com", "Password123", "Password123"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Account created successfully");
    assert!(body["userId"].is_string());
}

#[tokio::test]
async fn test_sign_up_duplicate_email_conflicts() {
    let app = test_app().await;
    register(&app).await;

    let (status, body) = send(
        &app,
        post_json(
            "/auth/signup",
            sign_up_body("test@example.com", "Password123", "Password123"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(
        body["error"]["message"],
        "An account with this email already exists"
    );
}

#[tokio::test]
async fn test_sign_up_mismatched_confirmation() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/auth/signup",
            sign_up_body("test@example.com", "Password123", "Password456"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["error"]["fields"]["confirmPassword"][0],
        "passwords do not match"
    );
    assert!(body["error"]["fields"].get("password").is_none());
}

#[tokio::test]
async fn test_sign_up_reports_every_invalid_field() {
    let app = test_app().await;

    let (status, body) = send(&app, post_json("/auth/signup", sign_up_body("bad", "weak", "weak"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = &body["error"]["fields"];
    assert_eq!(fields["email"][0], "please enter a valid email");
    let password: Vec<&str> = fields["password"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(password.contains(&"password must be at least 8 characters"));
}

#[tokio::test]
async fn test_sign_up_malformed_body() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        post_json("/auth/signup", json!({ "email": "test@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

// =============================================================================
// Sign-in & Session
// =============================================================================

#[tokio::test]
async fn test_sign_in_success_and_session_lookup() {
    let app = test_app().await;
    register(&app).await;

    let (status, body) = send(
        &app,
        post_json(
            "/auth/signin",
            json!({ "email": "test@example.com", "password": "Password123" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["expiresIn"], 86400);
    assert_eq!(body["user"]["firstName"], "John");
    assert_eq!(body["user"]["email"], "test@example.com");

    let token = body["accessToken"].as_str().unwrap();
    let request = Request::builder()
        .uri("/auth/session")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, session) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["id"], body["user"]["id"]);
    assert_eq!(session["lastName"], "Doe");
}

#[tokio::test]
async fn test_sign_in_failures_are_indistinguishable() {
    let app = test_app().await;
    register(&app).await;

    let (wrong_status, wrong_body) = send(
        &app,
        post_json(
            "/auth/signin",
            json!({ "email": "test@example.com", "password": "WrongPassword1" }),
        ),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        post_json(
            "/auth/signin",
            json!({ "email": "nobody@example.com", "password": "Password123" }),
        ),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"]["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_sign_in_invalid_email_shape() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        post_json(
            "/auth/signin",
            json!({ "email": "invalid-email", "password": "anypassword" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["fields"]["email"][0], "please enter a valid email");
}

#[tokio::test]
async fn test_session_requires_token() {
    let app = test_app().await;

    let request = Request::builder()
        .uri("/auth/session")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_session_rejects_invalid_token() {
    let app = test_app().await;

    let request = Request::builder()
        .uri("/auth/session")
        .header(header::AUTHORIZATION, "Bearer not-a-real-token")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = test_app().await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

// =============================================================================
// OpenAPI
// =============================================================================

#[test]
fn test_openapi_document_describes_auth_api() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

    let schemas = &doc["components"]["schemas"];
    for name in ["SignUpRequest", "Credentials", "SignUpResponse", "SignInResponse", "UserIdentity"] {
        assert!(schemas.get(name).is_some(), "missing schema {}", name);
    }
    assert!(doc["paths"].get("/auth/signup").is_some());
    assert!(doc["paths"].get("/auth/session").is_some());
    assert!(doc["components"]["securitySchemes"].get("bearer_auth").is_some());
}
