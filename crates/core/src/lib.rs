//! Domain rules for the SoleStyle storefront.
//!
//! Everything here is pure: no database, no HTTP. The `db` and `api` crates
//! depend on these types and helpers so validation happens once, close to the
//! request boundary.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod product;
pub mod roles;
pub mod types;
