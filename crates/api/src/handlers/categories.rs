//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use solestyle_db::models::category::Category;
use solestyle_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<CategoriesResponse>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(CategoriesResponse { categories }))
}
