//! Request body extractors whose rejections use the JSON error envelope.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections converted to [`AppError`], so malformed or
/// mistyped bodies answer 400 `{error, code}` like every other validation
/// failure.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
