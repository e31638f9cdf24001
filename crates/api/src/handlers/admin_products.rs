//! Handlers for `/admin/products` (create, patch, delete).
//!
//! The admin gate has already validated the session; each handler also takes
//! [`RequireAdmin`]. Create and patch read `multipart/form-data` bodies.

use std::collections::HashMap;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use solestyle_core::catalog::parse_price;
use solestyle_core::error::CoreError;
use solestyle_core::product::{
    parse_flag, parse_variants, slugify, variant_sku, ProductStatus, PLACEHOLDER_IMAGE_URL,
};
use solestyle_core::types::DbId;
use solestyle_db::models::product::{CreateProduct, CreateVariant, UpdateProduct};
use solestyle_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Form parsing
// ---------------------------------------------------------------------------

/// Text fields of a multipart form. Blank values are dropped; file parts
/// are read to completion and discarded.
#[derive(Debug, Default)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut fields = HashMap::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if field.file_name().is_some() {
                let skipped = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                tracing::debug!(field = %name, bytes = skipped.len(), "Ignoring uploaded file");
                continue;
            }
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            let text = text.trim();
            if !name.is_empty() && !text.is_empty() {
                fields.insert(name, text.to_string());
            }
        }
        Ok(Self(fields))
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    fn price(&self, name: &str) -> AppResult<Option<Decimal>> {
        Ok(parse_price(name, self.get(name))?)
    }

    /// The `price` field, which must be greater than zero when present.
    fn list_price(&self) -> AppResult<Option<Decimal>> {
        let price = self.price("price")?;
        if price.is_some_and(|p| p.is_zero()) {
            return Err(AppError::Core(CoreError::Validation(
                "price must be greater than zero".into(),
            )));
        }
        Ok(price)
    }

    fn id(&self, name: &str) -> AppResult<Option<DbId>> {
        self.get(name)
            .map(|v| {
                v.parse::<DbId>().map_err(|_| {
                    AppError::Core(CoreError::Validation(format!(
                        "{name} must be an integer id"
                    )))
                })
            })
            .transpose()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .filter(|(_, v): &(String, String)| !v.trim().is_empty())
                .collect(),
        )
    }
}

/// Build the insert DTO for a new product from its form fields.
pub fn build_create(form: &FormFields) -> AppResult<CreateProduct> {
    let (Some(name), Some(price), Some(category_id), Some(brand)) = (
        form.text("name"),
        form.list_price()?,
        form.id("categoryId")?,
        form.text("brand"),
    ) else {
        return Err(AppError::Core(CoreError::Validation(
            "Name, price, category, and brand are required".into(),
        )));
    };

    let slug = slugify(&name);
    if slug.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must contain at least one letter or digit".into(),
        )));
    }

    let sku = form.text("sku");
    let sku_base = sku.clone().unwrap_or_else(|| slug.to_uppercase());
    let variants = parse_variants(form.get("variants"))?
        .into_iter()
        .map(|v| CreateVariant {
            sku: variant_sku(&sku_base, &v.size, &v.color),
            size: v.size,
            color: v.color,
            stock_quantity: v.stock_quantity,
        })
        .collect();

    Ok(CreateProduct {
        primary_image_alt: format!("{name} - Main Image"),
        name,
        slug,
        description: form.text("description"),
        price,
        sale_price: form.price("salePrice")?,
        category_id,
        brand,
        sku,
        featured: form.get("featured").is_some_and(parse_flag),
        variants,
        primary_image_url: PLACEHOLDER_IMAGE_URL.to_string(),
    })
}

/// Build the patch DTO from whichever fields are present.
pub fn build_update(form: &FormFields) -> AppResult<UpdateProduct> {
    let status = form
        .get("status")
        .map(ProductStatus::parse)
        .transpose()?
        .map(|s| s.as_str().to_string());

    let update = UpdateProduct {
        name: form.text("name"),
        description: form.text("description"),
        price: form.list_price()?,
        sale_price: form.price("salePrice")?,
        category_id: form.id("categoryId")?,
        brand: form.text("brand"),
        sku: form.text("sku"),
        featured: form.get("featured").map(parse_flag),
        status,
    };

    if update.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update".into(),
        )));
    }
    Ok(update)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductResponse {
    pub message: &'static str,
    pub product_id: DbId,
}

/// POST /api/admin/products
///
/// Create a product with its variants and a placeholder primary image.
pub async fn create_product(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<CreateProductResponse>)> {
    let form = FormFields::read(multipart).await?;
    let input = build_create(&form)?;

    let product_id = ProductRepo::create(&state.pool, &input).await?;

    tracing::info!(
        product_id,
        admin_id = admin.user_id,
        slug = %input.slug,
        variants = input.variants.len(),
        "Product created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateProductResponse {
            message: "Product created successfully",
            product_id,
        }),
    ))
}

/// PATCH /api/admin/products/{id}
///
/// Apply the fields present in the form; everything else is left unchanged.
pub async fn update_product(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<MessageResponse>> {
    let form = FormFields::read(multipart).await?;
    let input = build_update(&form)?;

    if !ProductRepo::update(&state.pool, id, &input).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }

    tracing::info!(product_id = id, admin_id = admin.user_id, "Product updated");
    Ok(Json(MessageResponse::new("Product updated successfully")))
}

/// DELETE /api/admin/products/{id}
///
/// Variants, images, reviews and cart lines referencing the product cascade.
pub async fn delete_product(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !ProductRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }

    tracing::info!(product_id = id, admin_id = admin.user_id, "Product deleted");
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}
