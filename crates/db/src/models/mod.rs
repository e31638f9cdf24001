//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` structs matching database rows or joined projections
//! - `Serialize` response shapes (camelCase on the wire)
//! - `Deserialize` / plain DTOs for inserts and patches

pub mod cart;
pub mod category;
pub mod product;
pub mod review;
pub mod user;
