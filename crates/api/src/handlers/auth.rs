//! Handlers for the `/auth` resource (register, login, logout, me).
//!
//! Successful register and login set the `auth-token` cookie; logout clears
//! it. The token is never returned in a response body.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use solestyle_core::error::CoreError;
use solestyle_core::roles::ROLE_CUSTOMER;
use solestyle_db::models::user::{CreateUser, User, UserResponse};
use solestyle_db::repositories::UserRepo;

use crate::auth::cookie::{clear_cookie, session_cookie};
use crate::auth::jwt::generate_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `{ "user": ... }` body returned by register, login and me.
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: Option<UserResponse>,
}

type SessionResponse = (StatusCode, [(HeaderName, HeaderValue); 1], Json<UserEnvelope>);

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a customer account and start a session.
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<SessionResponse> {
    let email = normalize_email(&input.email)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let first_name = input.first_name.trim();
    let last_name = input.last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "First and last name are required".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role: ROLE_CUSTOMER.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    start_session(&state, user, StatusCode::CREATED)
}

/// POST /api/auth/login
///
/// Verify credentials and start a session.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<SessionResponse> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let email = input.email.trim().to_lowercase();
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    start_session(&state, user, StatusCode::OK)
}

/// POST /api/auth/logout
///
/// Clear the session cookie. Succeeds with or without a session.
pub async fn logout(
    State(state): State<AppState>,
) -> (StatusCode, [(HeaderName, HeaderValue); 1], Json<MessageResponse>) {
    (
        StatusCode::OK,
        [(SET_COOKIE, clear_cookie(state.config.cookie_secure))],
        Json(MessageResponse::new("Logged out successfully")),
    )
}

/// GET /api/auth/me
///
/// The current user, or `null` when there is no valid session or the user
/// no longer exists.
pub async fn me(
    State(state): State<AppState>,
    user: Option<AuthUser>,
) -> AppResult<Json<UserEnvelope>> {
    let user = match user {
        Some(auth) => UserRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .map(UserResponse::from),
        None => None,
    };
    Ok(Json(UserEnvelope { user }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a token for `user` and attach it as the session cookie.
fn start_session(state: &AppState, user: User, status: StatusCode) -> AppResult<SessionResponse> {
    let jwt = &state.config.jwt;
    let token = generate_token(user.id, &user.email, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let cookie = session_cookie(&token, jwt.expiry_secs(), state.config.cookie_secure)
        .map_err(|e| AppError::InternalError(format!("Cookie encoding error: {e}")))?;

    Ok((
        status,
        [(SET_COOKIE, cookie)],
        Json(UserEnvelope {
            user: Some(user.into()),
        }),
    ))
}

/// Trim and lowercase an email, rejecting values without an `@`.
fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AppError::Core(CoreError::Validation(
            "A valid email address is required".into(),
        ))),
    }
}
