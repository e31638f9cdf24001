//! Handlers for the public `/products` catalog.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use solestyle_core::catalog::{CatalogParams, FilterSpec, Pagination};
use solestyle_core::error::CoreError;
use solestyle_core::types::DbId;
use solestyle_db::models::product::{CatalogEntry, ProductDetail};
use solestyle_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response body for `GET /products`.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub products: Vec<CatalogEntry>,
    pub pagination: Pagination,
}

/// GET /api/products
///
/// Active products filtered by category, free-text search, price range and
/// the featured flag, sorted and paginated.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> AppResult<Json<CatalogResponse>> {
    let spec = FilterSpec::from_params(&params)?;
    let page = ProductRepo::search(&state.pool, &spec).await?;

    Ok(Json(CatalogResponse {
        products: page.rows.into_iter().map(Into::into).collect(),
        pagination: Pagination::new(spec.page, spec.limit, page.total),
    }))
}

/// GET /api/products/{id}
///
/// A single active product with images, variants and recent reviews.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductDetail>> {
    let product = ProductRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;
    Ok(Json(product))
}
