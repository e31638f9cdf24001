//! Session-token authentication extractor for Axum handlers.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use solestyle_core::error::CoreError;
use solestyle_core::types::DbId;

use crate::auth::cookie::session_token;
use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the `auth-token` cookie (or a
/// `Authorization: Bearer` header).
///
/// Use this as an extractor parameter in any handler that requires a session:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Wrap it in `Option` for routes where the session is optional.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's email (from `claims.email`).
    pub email: String,
    /// The user's role name (`"admin"` or `"customer"`).
    pub role: String,
}

impl AuthUser {
    /// Resolve the session from request headers.
    pub fn resolve(headers: &HeaderMap, jwt: &JwtConfig) -> Result<Self, AppError> {
        let token = session_token(headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Authentication required".into()))
        })?;

        let claims = validate_token(token, jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::resolve(&parts.headers, &state.config.jwt)
    }
}

impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(AuthUser::resolve(&parts.headers, &state.config.jwt).ok())
    }
}
