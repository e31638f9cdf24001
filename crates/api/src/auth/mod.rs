//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token generation and validation.
//! - [`cookie`] -- reading and writing the `auth-token` session cookie.

pub mod cookie;
pub mod jwt;
pub mod password;
