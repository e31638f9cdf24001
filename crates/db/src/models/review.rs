//! Product review models.

use serde::Serialize;
use sqlx::FromRow;
use solestyle_core::types::{DbId, Timestamp};

/// A row from the `product_reviews` table.
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: DbId,
    pub product_id: DbId,
    pub user_id: Option<DbId>,
    pub rating: i32,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub verified_purchase: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A review joined with its author's name, as shown on the product page.
#[derive(Debug, Clone, FromRow)]
pub struct ReviewWithAuthor {
    pub id: DbId,
    pub rating: i32,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub verified_purchase: bool,
    pub created_at: Timestamp,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewAuthor {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: DbId,
    pub rating: i32,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub verified_purchase: bool,
    pub created_at: Timestamp,
    pub user: ReviewAuthor,
}

impl From<ReviewWithAuthor> for ReviewResponse {
    fn from(row: ReviewWithAuthor) -> Self {
        Self {
            id: row.id,
            rating: row.rating,
            title: row.title,
            comment: row.comment,
            verified_purchase: row.verified_purchase,
            created_at: row.created_at,
            user: ReviewAuthor {
                first_name: row.first_name,
                last_name: row.last_name,
            },
        }
    }
}

/// DTO for inserting a review.
#[derive(Debug)]
pub struct CreateReview {
    pub product_id: DbId,
    pub user_id: Option<DbId>,
    pub rating: i32,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub verified_purchase: bool,
}
