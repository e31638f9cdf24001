//! Cart line models.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use solestyle_core::types::{DbId, Timestamp};

/// A row from the `cart_items` table.
#[derive(Debug, Clone, FromRow)]
pub struct CartItem {
    pub id: DbId,
    pub user_id: DbId,
    pub product_id: DbId,
    pub product_variant_id: DbId,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart line joined with the current product and variant snapshot.
#[derive(Debug, Clone, FromRow)]
pub struct CartLineRow {
    pub id: DbId,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub product_id: DbId,
    pub product_name: String,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub product_image: Option<String>,
    pub product_variant_id: DbId,
    pub size: String,
    pub color: String,
    pub stock_quantity: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub id: DbId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub sale_price: Option<Decimal>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartVariant {
    pub id: DbId,
    pub size: String,
    pub color: String,
    pub stock_quantity: i32,
}

/// A cart line as returned by `GET /cart`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: DbId,
    pub quantity: i32,
    pub product: CartProduct,
    pub variant: CartVariant,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        Self {
            id: row.id,
            quantity: row.quantity,
            product: CartProduct {
                id: row.product_id,
                name: row.product_name,
                price: row.price,
                sale_price: row.sale_price,
                image: row.product_image,
            },
            variant: CartVariant {
                id: row.product_variant_id,
                size: row.size,
                color: row.color,
                stock_quantity: row.stock_quantity,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for an add-to-cart request after validation.
#[derive(Debug, Clone)]
pub struct AddCartItem {
    pub user_id: DbId,
    pub product_id: DbId,
    pub variant_id: DbId,
    pub quantity: i32,
}
