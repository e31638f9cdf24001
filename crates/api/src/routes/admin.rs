//! Route definitions for the `/admin` resource.

use axum::middleware::from_fn_with_state;
use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::admin_products;
use crate::middleware::admin_gate::admin_gate;
use crate::state::AppState;

/// Routes mounted at `/admin`, all behind [`admin_gate`].
///
/// ```text
/// POST   /products        -> create_product
/// PATCH  /products/{id}   -> update_product
/// DELETE /products/{id}   -> delete_product
/// ```
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/products", post(admin_products::create_product))
        .route(
            "/products/{id}",
            patch(admin_products::update_product).delete(admin_products::delete_product),
        )
        .layer(from_fn_with_state(state, admin_gate))
}
