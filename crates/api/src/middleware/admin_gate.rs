//! Route-prefix gate for `/admin`.
//!
//! Validates the session token and the admin role once, in front of every
//! admin route. Browser navigations without a valid session are redirected
//! to the login page; API callers get the usual JSON error.

use axum::extract::{Request, State};
use axum::http::header::ACCEPT;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Axum middleware (use with `from_fn_with_state`) guarding the admin tree.
///
/// On success the resolved [`AuthUser`] is stored in the request extensions.
pub async fn admin_gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let user = match AuthUser::resolve(req.headers(), &state.config.jwt) {
        Ok(user) => user,
        Err(err) => {
            if wants_html(req.headers()) {
                tracing::debug!(path = %req.uri().path(), "Redirecting anonymous admin navigation");
                return Redirect::to(&state.config.login_path).into_response();
            }
            return err.into_response();
        }
    };

    match RequireAdmin::check(user) {
        Ok(RequireAdmin(admin)) => {
            req.extensions_mut().insert(admin);
            next.run(req).await
        }
        Err(err) => {
            tracing::warn!(path = %req.uri().path(), "Non-admin session rejected by admin gate");
            err.into_response()
        }
    }
}

/// `true` when the client is a browser asking for a page.
fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}
