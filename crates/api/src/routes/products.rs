//! Route definitions for the public catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET /       -> list_products
/// GET /{id}   -> get_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list_products))
        .route("/{id}", get(products::get_product))
}
