//! Authentication and authorization middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from the session cookie.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`admin_gate::admin_gate`] -- Route-prefix gate in front of every `/admin` route.

pub mod admin_gate;
pub mod auth;
pub mod rbac;
