//! Product catalog models: listing rows, detail children, and admin DTOs.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use solestyle_core::types::{DbId, Timestamp};

use crate::models::review::ReviewResponse;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// One product as produced by the catalog queries: the product columns plus
/// its category, primary image and review aggregates.
#[derive(Debug, Clone, FromRow)]
pub struct CatalogRow {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub brand: String,
    pub sku: Option<String>,
    pub featured: bool,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub primary_image: Option<String>,
    /// Mean review rating, 0 when the product has no reviews.
    pub average_rating: f64,
    pub review_count: i64,
}

/// A row from the `product_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: DbId,
    #[serde(skip)]
    pub product_id: DbId,
    pub image_url: String,
    pub alt_text: Option<String>,
    pub sort_order: i32,
    pub is_primary: bool,
}

/// A row from the `product_variants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: DbId,
    #[serde(skip)]
    pub product_id: DbId,
    pub size: String,
    pub color: String,
    pub stock_quantity: i32,
    pub sku: String,
    #[serde(skip)]
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Category name/slug pair embedded in catalog entries.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRef {
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// A catalog entry as returned by `GET /products`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub sale_price: Option<Decimal>,
    pub brand: String,
    pub sku: Option<String>,
    pub featured: bool,
    pub status: String,
    pub category: CategoryRef,
    pub primary_image: Option<String>,
    pub average_rating: f64,
    pub review_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CatalogRow> for CatalogEntry {
    fn from(row: CatalogRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
            price: row.price,
            sale_price: row.sale_price,
            brand: row.brand,
            sku: row.sku,
            featured: row.featured,
            status: row.status,
            category: CategoryRef {
                name: row.category_name,
                slug: row.category_slug,
            },
            primary_image: row.primary_image,
            average_rating: row.average_rating,
            review_count: row.review_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A single product with its images, variants and most recent reviews.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub entry: CatalogEntry,
    pub images: Vec<ProductImage>,
    pub variants: Vec<ProductVariant>,
    pub reviews: Vec<ReviewResponse>,
}

/// One page of catalog results plus the total match count.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub rows: Vec<CatalogRow>,
    pub total: i64,
}

// ---------------------------------------------------------------------------
// DTOs (write payloads)
// ---------------------------------------------------------------------------

/// DTO for a variant created together with its product.
#[derive(Debug, Clone)]
pub struct CreateVariant {
    pub size: String,
    pub color: String,
    pub stock_quantity: i32,
    pub sku: String,
}

/// DTO for creating a product with its variants and primary image.
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub category_id: DbId,
    pub brand: String,
    pub sku: Option<String>,
    pub featured: bool,
    pub variants: Vec<CreateVariant>,
    pub primary_image_url: String,
    pub primary_image_alt: String,
}

/// DTO for patching a product. Only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub category_id: Option<DbId>,
    pub brand: Option<String>,
    pub sku: Option<String>,
    pub featured: Option<bool>,
    pub status: Option<String>,
}

impl UpdateProduct {
    /// `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.sale_price.is_none()
            && self.category_id.is_none()
            && self.brand.is_none()
            && self.sku.is_none()
            && self.featured.is_none()
            && self.status.is_none()
    }
}
