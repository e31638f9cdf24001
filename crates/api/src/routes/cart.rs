//! Route definitions for the `/cart` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

/// Routes mounted at `/cart`.
///
/// ```text
/// GET    /       -> get_cart
/// POST   /       -> add_to_cart
/// PUT    /{id}   -> update_cart_item
/// DELETE /{id}   -> remove_cart_item
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::get_cart).post(cart::add_to_cart))
        .route(
            "/{id}",
            put(cart::update_cart_item).delete(cart::remove_cart_item),
        )
}
