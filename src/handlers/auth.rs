use axum::{
    extract::State,
    http::{header, HeaderMap},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::errors::ApiError;
use crate::handlers::common::{created_response, message_response, success_response};
use crate::AppState;

/// Creates the router for session endpoints.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/guest", post(guest_session))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/current", get(current_user))
        .route("/logout", post(logout))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

// Request DTOs

#[derive(Debug, Deserialize, ToSchema)]
pub struct GuestRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Create (or resume) a guest session.
#[utoipa::path(
    post,
    path = "/api/auth/guest",
    request_body = GuestRequest,
    responses((status = 200, description = "Guest session with bearer token", body = crate::ApiResponse<crate::services::AuthSession>)),
    tag = "Auth"
)]
pub async fn guest_session(
    State(state): State<AppState>,
    Json(payload): Json<GuestRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let session = state
        .services
        .sessions
        .guest(payload.name, payload.email)
        .await?;
    Ok(message_response("Guest session created", session))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created; session started", body = crate::ApiResponse<crate::services::AuthSession>),
        (status = 400, description = "Missing fields or email already taken", body = crate::errors::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let (name, email, password) = match (payload.name, payload.email, payload.password) {
        (Some(name), Some(email), Some(password)) => (name, email, password),
        _ => {
            return Err(ApiError::ValidationError(
                "Name, email, and password are required".to_string(),
            ))
        }
    };

    let session = state
        .services
        .sessions
        .register(&name, &email, &password, payload.phone)
        .await?;
    Ok(created_response("User registered successfully", session))
}

/// Log in with email and password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session started", body = crate::ApiResponse<crate::services::AuthSession>),
        (status = 401, description = "Bad credentials", body = crate::errors::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let (email, password) = match (payload.email, payload.password) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(ApiError::ValidationError(
                "Email and password are required".to_string(),
            ))
        }
    };

    let session = state.services.sessions.login(&email, &password).await?;
    Ok(message_response("Login successful", session))
}

/// Resolve the bearer token to the current user.
#[utoipa::path(
    get,
    path = "/api/auth/current",
    responses(
        (status = 200, description = "Current user", body = crate::ApiResponse<crate::services::UserResponse>),
        (status = 401, description = "No active session", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Auth"
)]
pub async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let token = bearer_token(&headers);
    let user = state.services.sessions.current(token.as_deref()).await?;
    Ok(success_response(user))
}

/// End the current session. Idempotent.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Session ended")),
    security(("Bearer" = [])),
    tag = "Auth"
)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let token = bearer_token(&headers);
    state.services.sessions.logout(token.as_deref()).await;
    Ok(message_response("Logged out successfully", serde_json::json!({})))
}
