//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use rust_decimal::Decimal;
use solestyle_core::types::DbId;
use solestyle_db::models::product::{CreateProduct, CreateVariant, UpdateProduct};
use solestyle_db::models::user::CreateUser;
use solestyle_db::repositories::{CategoryRepo, ProductRepo, UserRepo};
use sqlx::PgPool;

/// Insert a customer and return its id.
pub async fn seed_user(pool: &PgPool, email: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            first_name: "Test".to_string(),
            last_name: "Shopper".to_string(),
            role: "customer".to_string(),
        },
    )
    .await
    .expect("user insert should succeed")
    .id
}

/// Id of one of the categories seeded by migration.
pub async fn category_id(pool: &PgPool, slug: &str) -> DbId {
    CategoryRepo::find_by_slug(pool, slug)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("category {slug} should be seeded"))
        .id
}

/// Product fixture with sensible defaults; override fields as needed.
pub fn product(name: &str, price: &str, category_id: DbId) -> CreateProduct {
    let slug = solestyle_core::product::slugify(name);
    CreateProduct {
        name: name.to_string(),
        slug: slug.clone(),
        description: Some(format!("{name} description")),
        price: price.parse::<Decimal>().unwrap(),
        sale_price: None,
        category_id,
        brand: "SoleStyle".to_string(),
        sku: None,
        featured: false,
        variants: vec![CreateVariant {
            size: "42".to_string(),
            color: "Black".to_string(),
            stock_quantity: 10,
            sku: format!("{}-42-BLA", slug.to_uppercase()),
        }],
        primary_image_url: format!("/images/{slug}.jpg"),
        primary_image_alt: name.to_string(),
    }
}

/// Insert a product and return its id.
pub async fn seed_product(pool: &PgPool, input: &CreateProduct) -> DbId {
    ProductRepo::create(pool, input)
        .await
        .expect("product insert should succeed")
}

/// Change a product's lifecycle status.
pub async fn set_status(pool: &PgPool, id: DbId, status: &str) {
    let update = UpdateProduct {
        status: Some(status.to_string()),
        ..Default::default()
    };
    assert!(ProductRepo::update(pool, id, &update).await.unwrap());
}

/// Id of the first variant of a product.
pub async fn first_variant(pool: &PgPool, product_id: DbId) -> DbId {
    ProductRepo::variants_for_product(pool, product_id)
        .await
        .unwrap()
        .first()
        .expect("product should have a variant")
        .id
}
