pub mod admin;
pub mod auth;
pub mod cart;
pub mod health;
pub mod products;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                     list (public; filters, sort, paging)
/// /products/{id}                detail (public)
/// /categories                   list (public)
///
/// /cart                         get, add (session required)
/// /cart/{id}                    update quantity, remove (session required)
///
/// /auth/register                register (public)
/// /auth/login                   login (public)
/// /auth/logout                  logout (public)
/// /auth/me                      current user or null (public)
///
/// /admin/products               create (admin, multipart)
/// /admin/products/{id}          patch (admin, multipart), delete (admin)
/// ```
///
/// Everything under `/admin` sits behind the admin gate.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .route("/categories", get(handlers::categories::list_categories))
        .nest("/cart", cart::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router(state))
}
