//! Handlers for the `/cart` resource.
//!
//! Every handler takes [`AuthUser`], so requests without a session are
//! rejected before any database access. All statements are scoped to the
//! caller's user id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use solestyle_core::cart::{quantity_limit_exceeded, validate_add, validate_quantity};
use solestyle_core::error::CoreError;
use solestyle_core::types::DbId;
use solestyle_db::models::cart::{AddCartItem, CartLine};
use solestyle_db::repositories::CartRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /cart`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Option<DbId>,
    pub variant_id: Option<DbId>,
    pub quantity: Option<i32>,
}

/// Request body for `PUT /cart/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: Option<i32>,
}

/// Response body for `GET /cart`.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLine>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/cart
///
/// The caller's cart lines, newest first, with the current product and
/// variant snapshot.
pub async fn get_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<CartResponse>> {
    let rows = CartRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(CartResponse {
        items: rows.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/cart
///
/// Add a variant to the cart. Adding a variant already in the cart
/// increments that line instead of creating a second one.
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(input): AppJson<AddToCartRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let (product_id, variant_id, quantity) =
        validate_add(input.product_id, input.variant_id, input.quantity)?;

    let item = CartRepo::add_or_increment(
        &state.pool,
        &AddCartItem {
            user_id: user.user_id,
            product_id,
            variant_id,
            quantity,
        },
    )
    .await?;

    let Some(item) = item else {
        // The upsert also declines when the summed quantity is over the limit.
        let existing =
            CartRepo::find_for_user_variant(&state.pool, user.user_id, variant_id).await?;
        if existing.iter().any(|line| line.product_id == product_id) {
            return Err(AppError::Core(quantity_limit_exceeded()));
        }
        return Err(AppError::Core(CoreError::Validation(
            "Variant does not exist for this product".into(),
        )));
    };

    tracing::info!(
        user_id = user.user_id,
        product_id,
        variant_id,
        cart_item_id = item.id,
        quantity = item.quantity,
        "Cart line added"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Item added to cart")),
    ))
}

/// PUT /api/cart/{id}
///
/// Overwrite the quantity of one of the caller's cart lines.
pub async fn update_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateCartItemRequest>,
) -> AppResult<Json<MessageResponse>> {
    let quantity = input
        .quantity
        .ok_or_else(|| AppError::Core(CoreError::Validation("Quantity is required".into())))?;
    let quantity = validate_quantity(quantity)?;

    CartRepo::update_quantity(&state.pool, id, user.user_id, quantity)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CartItem",
            id,
        }))?;

    tracing::info!(user_id = user.user_id, cart_item_id = id, quantity, "Cart line updated");

    Ok(Json(MessageResponse::new("Cart updated")))
}

/// DELETE /api/cart/{id}
///
/// Remove one of the caller's cart lines. Removing a line that is absent or
/// owned by someone else still succeeds.
pub async fn remove_cart_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let removed = CartRepo::remove(&state.pool, id, user.user_id).await?;
    tracing::info!(user_id = user.user_id, cart_item_id = id, removed, "Cart line removed");
    Ok(Json(MessageResponse::new("Item removed from cart")))
}
