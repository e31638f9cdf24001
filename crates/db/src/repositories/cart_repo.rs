//! Repository for the `cart_items` table.
//!
//! Every statement is scoped by `user_id`, so a caller can only ever read or
//! modify their own lines.

use sqlx::PgPool;
use solestyle_core::cart::MAX_QUANTITY;
use solestyle_core::types::DbId;

use crate::models::cart::{AddCartItem, CartItem, CartLineRow};

const COLUMNS: &str = "id, user_id, product_id, product_variant_id, quantity, \
                        created_at, updated_at";

pub struct CartRepo;

impl CartRepo {
    /// Add a variant to a user's cart, or increment the existing line.
    ///
    /// Runs as a single `INSERT ... ON CONFLICT` against
    /// `uq_cart_items_user_variant`, so concurrent adds of the same variant
    /// always converge on one line holding the summed quantity. The insert
    /// selects from `product_variants` to prove the variant belongs to the
    /// product.
    ///
    /// Returns `None` when the variant does not belong to the product (or
    /// either does not exist), and when the summed quantity would pass
    /// [`MAX_QUANTITY`]; in that case the existing line is left unchanged.
    pub async fn add_or_increment(
        pool: &PgPool,
        input: &AddCartItem,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!(
            "INSERT INTO cart_items (user_id, product_id, product_variant_id, quantity) \
             SELECT $1, pv.product_id, pv.id, $4 \
             FROM product_variants pv \
             WHERE pv.id = $3 AND pv.product_id = $2 \
             ON CONFLICT (user_id, product_variant_id) DO UPDATE SET \
                quantity = cart_items.quantity + EXCLUDED.quantity, \
                updated_at = NOW() \
             WHERE cart_items.quantity + EXCLUDED.quantity <= $5 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(input.user_id)
            .bind(input.product_id)
            .bind(input.variant_id)
            .bind(input.quantity)
            .bind(MAX_QUANTITY)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the quantity of one of the user's lines.
    ///
    /// Ownership is part of the `WHERE` clause. Returns `None` if no line with
    /// this id belongs to the user.
    pub async fn update_quantity(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        quantity: i32,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!(
            "UPDATE cart_items SET quantity = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(id)
            .bind(user_id)
            .bind(quantity)
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the user's lines. Returns `true` if a row was removed.
    pub async fn remove(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All lines for a user with the current product/variant snapshot,
    /// most recently created first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CartLineRow>, sqlx::Error> {
        sqlx::query_as::<_, CartLineRow>(
            "SELECT ci.id, ci.quantity, ci.created_at, ci.updated_at, \
                    p.id AS product_id, p.name AS product_name, p.price, p.sale_price, \
                    pi.image_url AS product_image, \
                    pv.id AS product_variant_id, pv.size, pv.color, pv.stock_quantity \
             FROM cart_items ci \
             JOIN products p ON p.id = ci.product_id \
             JOIN product_variants pv ON pv.id = ci.product_variant_id \
             LEFT JOIN product_images pi ON pi.product_id = p.id AND pi.is_primary = true \
             WHERE ci.user_id = $1 \
             ORDER BY ci.created_at DESC, ci.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// All raw lines for a (user, variant) pair. At most one by construction.
    pub async fn find_for_user_variant(
        pool: &PgPool,
        user_id: DbId,
        variant_id: DbId,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cart_items \
             WHERE user_id = $1 AND product_variant_id = $2"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(user_id)
            .bind(variant_id)
            .fetch_all(pool)
            .await
    }
}
