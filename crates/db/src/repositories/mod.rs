//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod cart_repo;
pub mod category_repo;
pub mod product_repo;
pub mod review_repo;
pub mod user_repo;

pub use cart_repo::CartRepo;
pub use category_repo::CategoryRepo;
pub use product_repo::ProductRepo;
pub use review_repo::ReviewRepo;
pub use user_repo::UserRepo;
