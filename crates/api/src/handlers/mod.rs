//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input, delegate to the corresponding repository in
//! `solestyle_db`, and map errors via [`AppError`](crate::error::AppError).

pub mod admin_products;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod products;
