//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use solestyle_core::error::CoreError;
use solestyle_core::roles::ROLE_ADMIN;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 401 without a session and 403
/// for any other role.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug)]
pub struct RequireAdmin(pub AuthUser);

impl RequireAdmin {
    /// Check that an already-resolved user holds the admin role.
    pub fn check(user: AuthUser) -> Result<Self, AppError> {
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already resolved by the admin gate on `/admin` routes.
        let user = match parts.extensions.get::<AuthUser>() {
            Some(user) => user.clone(),
            None => AuthUser::resolve(&parts.headers, &state.config.jwt)?,
        };
        RequireAdmin::check(user)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn user(role: &str) -> AuthUser {
        AuthUser {
            user_id: 7,
            email: "u@example.com".into(),
            role: role.into(),
        }
    }

    #[test]
    fn admin_passes() {
        let RequireAdmin(admin) = RequireAdmin::check(user("admin")).unwrap();
        assert_eq!(admin.user_id, 7);
    }

    #[test]
    fn customer_is_forbidden() {
        assert_matches!(
            RequireAdmin::check(user("customer")),
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
    }
}
