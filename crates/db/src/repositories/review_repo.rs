//! Repository for the `product_reviews` table.

use sqlx::PgPool;
use solestyle_core::types::DbId;

use crate::models::review::{CreateReview, Review, ReviewWithAuthor};

const COLUMNS: &str = "id, product_id, user_id, rating, title, comment, verified_purchase, \
                        created_at, updated_at";

pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_reviews \
                (product_id, user_id, rating, title, comment, verified_purchase) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.product_id)
            .bind(input.user_id)
            .bind(input.rating)
            .bind(&input.title)
            .bind(&input.comment)
            .bind(input.verified_purchase)
            .fetch_one(pool)
            .await
    }

    /// Most recent reviews for a product with the author's name.
    pub async fn recent_for_product(
        pool: &PgPool,
        product_id: DbId,
        limit: i64,
    ) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, ReviewWithAuthor>(
            "SELECT pr.id, pr.rating, pr.title, pr.comment, pr.verified_purchase, pr.created_at, \
                    u.first_name, u.last_name \
             FROM product_reviews pr \
             LEFT JOIN users u ON u.id = pr.user_id \
             WHERE pr.product_id = $1 \
             ORDER BY pr.created_at DESC, pr.id DESC \
             LIMIT $2",
        )
        .bind(product_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
