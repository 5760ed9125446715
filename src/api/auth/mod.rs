//! Authentication API endpoints
//!
//! Registration, login, logout, availability checks, and the current
//! session, JSON in and out. The boundary maps service results to status
//! codes; all the rules live in the services.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{bearer_token, RequireSession};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::account::Account;
use crate::domain::session::Session;
use crate::infrastructure::account::{Availability, RegisterRequest};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/check-username", get(check_username))
        .route("/check-email", get(check_email))
        .route("/me", get(current_session))
}

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub account: AccountResponse,
}

/// Account response (safe to expose; never carries the password hash)
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl AccountResponse {
    fn from_account(account: &Account) -> Self {
        Self {
            id: account.id().to_string(),
            username: account.username().to_string(),
            email: account.email().to_string(),
            is_active: account.is_active(),
            created_at: account.created_at().to_rfc3339(),
            last_login_at: account.last_login_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// Register a new account
///
/// POST /auth/register
///
/// Returns 201 on success, or 400 with the complete list of validation
/// errors.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let account = state
        .accounts
        .register(RegisterRequest {
            username: body.username,
            email: body.email,
            password: body.password,
            confirm_password: body.confirm_password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Registration successful! Please login to continue.".to_string(),
            account: AccountResponse::from_account(&account),
        }),
    ))
}

/// Login request body. The identifier may be a username or an email.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub identifier: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub account: AccountResponse,
    pub expires_at: String,
}

/// Login with username or email plus password
///
/// POST /auth/login
///
/// Returns a session token on success, 401 for bad credentials, 403 for a
/// deactivated account.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError> {
    let mut errors = Vec::new();

    if body.identifier.trim().is_empty() {
        errors.push("Username or email is required".to_string());
    }

    if body.password.is_empty() {
        errors.push("Password is required".to_string());
    }

    if !errors.is_empty() {
        return Err(ApiError::bad_request(errors));
    }

    let account = state
        .accounts
        .authenticate(&body.identifier, &body.password)
        .await?;

    let (token, session) = state.sessions.create(&account, body.remember).await?;
    let expires_at = state.sessions.policy().expires_at(&session);

    Ok(Json(LoginResponse {
        success: true,
        message: format!("Welcome back, {}!", account.username()),
        token: token.as_str().to_string(),
        account: AccountResponse::from_account(&account),
        expires_at: expires_at.to_rfc3339(),
    }))
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}

/// Destroy the current session
///
/// POST /auth/logout
///
/// Always succeeds, including without a session or with one that is
/// already gone.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, ApiError> {
    if let Some(token) = bearer_token(&headers) {
        state.sessions.destroy(&token).await?;
    }

    Ok(Json(LogoutResponse {
        success: true,
        message: "You have been logged out successfully".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CheckUsernameParams {
    #[serde(default)]
    pub username: String,
}

/// Check whether a username is still available
///
/// GET /auth/check-username?username=bob
///
/// Interactive pre-submit feedback only; registration re-checks uniqueness.
pub async fn check_username(
    State(state): State<AppState>,
    Query(params): Query<CheckUsernameParams>,
) -> Result<Json<Availability>, ApiError> {
    let availability = state
        .accounts
        .check_username_available(&params.username)
        .await?;

    Ok(Json(availability))
}

#[derive(Debug, Deserialize)]
pub struct CheckEmailParams {
    #[serde(default)]
    pub email: String,
}

/// Check whether an email is still available
///
/// GET /auth/check-email?email=bob@example.com
pub async fn check_email(
    State(state): State<AppState>,
    Query(params): Query<CheckEmailParams>,
) -> Result<Json<Availability>, ApiError> {
    let availability = state.accounts.check_email_available(&params.email).await?;

    Ok(Json(availability))
}

/// Session snapshot returned to authenticated callers
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub account_id: String,
    pub username: String,
    pub email: String,
    pub remember: bool,
}

impl SessionResponse {
    fn from_session(session: &Session) -> Self {
        Self {
            account_id: session.account_id().to_string(),
            username: session.username().to_string(),
            email: session.email().to_string(),
            remember: session.remember(),
        }
    }
}

/// Get the current authenticated session
///
/// GET /auth/me
pub async fn current_session(
    RequireSession(session): RequireSession,
) -> Result<Json<SessionResponse>, ApiError> {
    Ok(Json(SessionResponse::from_session(&session)))
}
