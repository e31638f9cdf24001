//! Repository for `products` and its child tables (`product_images`,
//! `product_variants`), including the public catalog query.

use sqlx::PgPool;
use solestyle_core::catalog::{FilterSpec, SortField, SortOrder};
use solestyle_core::types::DbId;

use crate::models::product::{
    CatalogPage, CatalogRow, CreateProduct, ProductDetail, ProductImage, ProductVariant,
    UpdateProduct,
};
use crate::repositories::ReviewRepo;

/// Number of reviews embedded in a product detail response.
pub const DETAIL_REVIEW_LIMIT: i64 = 10;

/// Product columns plus category, primary image and review aggregates.
///
/// Reviews are aggregated in a lateral subquery so the image join cannot
/// multiply the review count, and the aggregate is never filtered by the
/// listing's `WHERE` clause.
const CATALOG_SELECT: &str = "\
    SELECT p.id, p.name, p.slug, p.description, p.price, p.sale_price, p.brand, p.sku, \
           p.featured, p.status, p.created_at, p.updated_at, \
           c.name AS category_name, c.slug AS category_slug, \
           pi.image_url AS primary_image, \
           COALESCE(r.average_rating, 0)::FLOAT8 AS average_rating, \
           COALESCE(r.review_count, 0)::BIGINT AS review_count \
    FROM products p \
    LEFT JOIN categories c ON c.id = p.category_id \
    LEFT JOIN product_images pi ON pi.product_id = p.id AND pi.is_primary = true \
    LEFT JOIN LATERAL ( \
        SELECT AVG(pr.rating)::FLOAT8 AS average_rating, COUNT(*) AS review_count \
        FROM product_reviews pr \
        WHERE pr.product_id = p.id \
    ) r ON true";

/// Public listing filter. Absent filters are bound as `NULL` (or `false` for
/// the featured flag) and drop out of the conjunction.
///
/// - `$1` category slug
/// - `$2` escaped `ILIKE` search pattern
/// - `$3` / `$4` inclusive price bounds
/// - `$5` featured-only flag
const CATALOG_FILTER: &str = "\
    WHERE p.status = 'active' \
      AND ($1::TEXT IS NULL OR c.slug = $1) \
      AND ($2::TEXT IS NULL OR p.name ILIKE $2 OR p.description ILIKE $2 OR p.brand ILIKE $2) \
      AND ($3::NUMERIC IS NULL OR p.price >= $3) \
      AND ($4::NUMERIC IS NULL OR p.price <= $4) \
      AND (NOT $5::BOOLEAN OR p.featured = true)";

const IMAGE_COLUMNS: &str = "id, product_id, image_url, alt_text, sort_order, is_primary";

const VARIANT_COLUMNS: &str = "id, product_id, size, color, stock_quantity, sku, created_at";

/// Build the page query for a sort key and direction.
///
/// The `ORDER BY` target comes from the [`SortField`] allow-list, never from
/// client text. Ties break on `p.id` in the same direction so pages are stable.
pub fn listing_sql(field: SortField, order: SortOrder) -> String {
    let dir = order.keyword();
    format!(
        "{CATALOG_SELECT} {CATALOG_FILTER} \
         ORDER BY {col} {dir}, p.id {dir} \
         LIMIT $6 OFFSET $7",
        col = field.column(),
    )
}

/// Build the total-match query sharing the listing's filter.
pub fn count_sql() -> String {
    format!(
        "SELECT COUNT(*) FROM products p \
         LEFT JOIN categories c ON c.id = p.category_id \
         {CATALOG_FILTER}"
    )
}

/// Provides catalog reads and admin writes for products.
pub struct ProductRepo;

impl ProductRepo {
    // -----------------------------------------------------------------------
    // Catalog reads
    // -----------------------------------------------------------------------

    /// Run the page query and the count query for a validated filter.
    pub async fn search(pool: &PgPool, spec: &FilterSpec) -> Result<CatalogPage, sqlx::Error> {
        let pattern = spec.search_pattern();

        let rows = sqlx::query_as::<_, CatalogRow>(&listing_sql(spec.sort_field, spec.sort_order))
            .bind(spec.category.as_deref())
            .bind(pattern.as_deref())
            .bind(spec.min_price)
            .bind(spec.max_price)
            .bind(spec.featured_only)
            .bind(spec.limit)
            .bind(spec.offset())
            .fetch_all(pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>(&count_sql())
            .bind(spec.category.as_deref())
            .bind(pattern.as_deref())
            .bind(spec.min_price)
            .bind(spec.max_price)
            .bind(spec.featured_only)
            .fetch_one(pool)
            .await?;

        tracing::debug!(
            returned = rows.len(),
            total,
            page = spec.page,
            limit = spec.limit,
            "Catalog query executed"
        );

        Ok(CatalogPage { rows, total })
    }

    /// Find an active product by id with its catalog aggregates.
    pub async fn find_active_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CatalogRow>, sqlx::Error> {
        let query = format!("{CATALOG_SELECT} WHERE p.id = $1 AND p.status = 'active'");
        sqlx::query_as::<_, CatalogRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Images for a product, by sort order with the primary image first on ties.
    pub async fn images_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductImage>, sqlx::Error> {
        let query = format!(
            "SELECT {IMAGE_COLUMNS} FROM product_images \
             WHERE product_id = $1 \
             ORDER BY sort_order, is_primary DESC, id"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Variants for a product ordered by size, then color.
    pub async fn variants_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductVariant>, sqlx::Error> {
        let query = format!(
            "SELECT {VARIANT_COLUMNS} FROM product_variants \
             WHERE product_id = $1 \
             ORDER BY size, color"
        );
        sqlx::query_as::<_, ProductVariant>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Find an active product enriched with images, variants and recent reviews.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductDetail>, sqlx::Error> {
        let Some(row) = Self::find_active_by_id(pool, id).await? else {
            return Ok(None);
        };

        let images = Self::images_for_product(pool, id).await?;
        let variants = Self::variants_for_product(pool, id).await?;
        let reviews = ReviewRepo::recent_for_product(pool, id, DETAIL_REVIEW_LIMIT)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(Some(ProductDetail {
            entry: row.into(),
            images,
            variants,
            reviews,
        }))
    }

    // -----------------------------------------------------------------------
    // Admin writes
    // -----------------------------------------------------------------------

    /// Insert a product with its variants and primary image in one transaction.
    ///
    /// Returns the new product id.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let product_id: DbId = sqlx::query_scalar(
            "INSERT INTO products \
                (name, slug, description, price, sale_price, category_id, brand, sku, featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.sale_price)
        .bind(input.category_id)
        .bind(&input.brand)
        .bind(&input.sku)
        .bind(input.featured)
        .fetch_one(&mut *tx)
        .await?;

        for variant in &input.variants {
            sqlx::query(
                "INSERT INTO product_variants (product_id, size, color, stock_quantity, sku) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(product_id)
            .bind(&variant.size)
            .bind(&variant.color)
            .bind(variant.stock_quantity)
            .bind(&variant.sku)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            "INSERT INTO product_images (product_id, image_url, alt_text, sort_order, is_primary) \
             VALUES ($1, $2, $3, 0, true)",
        )
        .bind(product_id)
        .bind(&input.primary_image_url)
        .bind(&input.primary_image_alt)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(product_id)
    }

    /// Update a product. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `true` if the product exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                price = COALESCE($4, price), \
                sale_price = COALESCE($5, sale_price), \
                category_id = COALESCE($6, category_id), \
                brand = COALESCE($7, brand), \
                sku = COALESCE($8, sku), \
                featured = COALESCE($9, featured), \
                status = COALESCE($10, status) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.sale_price)
        .bind(input.category_id)
        .bind(&input.brand)
        .bind(&input.sku)
        .bind(input.featured)
        .bind(&input.status)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a product. Variants, images, reviews and cart lines cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
