//! Shared harness for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{ACCEPT, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use solestyle_api::auth::jwt::{generate_token, JwtConfig};
use solestyle_api::auth::password::hash_password;
use solestyle_api::config::ServerConfig;
use solestyle_api::router::build_app_router;
use solestyle_api::state::AppState;
use solestyle_core::types::DbId;
use solestyle_db::models::product::{CreateProduct, CreateVariant};
use solestyle_db::models::user::{CreateUser, User};
use solestyle_db::repositories::{CategoryRepo, ProductRepo, UserRepo};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-42";
pub const MULTIPART_BOUNDARY: &str = "----solestyle-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        cookie_secure: false,
        login_path: "/auth/login".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            token_expiry_hours: 1,
        },
    }
}

/// Build the full application router, using the same middleware stack as
/// production.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] and the given role.
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> User {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        role: role.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// `Cookie` header value carrying a valid session for `user`.
pub fn session_for(user: &User) -> String {
    let token = generate_token(user.id, &user.email, &user.role, &test_config().jwt)
        .expect("token generation should succeed");
    format!("auth-token={token}")
}

pub async fn category_id(pool: &PgPool, slug: &str) -> DbId {
    CategoryRepo::find_by_slug(pool, slug)
        .await
        .unwrap()
        .expect("category should be seeded")
        .id
}

/// Insert an active product with one variant per `(size, color)` and return
/// its id.
pub async fn create_product(
    pool: &PgPool,
    name: &str,
    price: &str,
    category_slug: &str,
    variants: &[(&str, &str)],
) -> DbId {
    let slug = solestyle_core::product::slugify(name);
    let input = CreateProduct {
        name: name.to_string(),
        slug: slug.clone(),
        description: None,
        price: price.parse().unwrap(),
        sale_price: None,
        category_id: category_id(pool, category_slug).await,
        brand: "SoleStyle".to_string(),
        sku: None,
        featured: false,
        variants: variants
            .iter()
            .map(|(size, color)| CreateVariant {
                size: size.to_string(),
                color: color.to_string(),
                stock_quantity: 5,
                sku: solestyle_core::product::variant_sku(&slug.to_uppercase(), size, color),
            })
            .collect(),
        primary_image_url: "/placeholder.svg".to_string(),
        primary_image_alt: name.to_string(),
    };
    ProductRepo::create(pool, &input)
        .await
        .expect("product creation should succeed")
}

pub async fn variant_ids(pool: &PgPool, product_id: DbId) -> Vec<DbId> {
    ProductRepo::variants_for_product(pool, product_id)
        .await
        .unwrap()
        .into_iter()
        .map(|v| v.id)
        .collect()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn builder(method: Method, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match cookie {
        Some(cookie) => builder.header(COOKIE, cookie),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(
        app,
        builder(Method::GET, uri, Some(cookie)).body(Body::empty()).unwrap(),
    )
    .await
}

/// GET as a browser navigation (`Accept: text/html`).
pub async fn get_html(app: Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    send(
        app,
        builder(Method::GET, uri, cookie)
            .header(ACCEPT, "text/html,application/xhtml+xml")
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send_raw_json(app, method, uri, cookie, &body.to_string()).await
}

/// Send `body` verbatim with a JSON content type, for malformed payloads.
pub async fn send_raw_json(
    app: Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: &str,
) -> Response<Body> {
    send(
        app,
        builder(method, uri, cookie)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, None, body).await
}

pub async fn delete(app: Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    send(app, builder(Method::DELETE, uri, cookie).body(Body::empty()).unwrap()).await
}

/// Encode text fields (and optionally one file part) as `multipart/form-data`.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"\r\n\r\n\
                 {value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"; filename=\"upload.jpg\"\r\n\
                 Content-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Vec<u8>,
) -> Response<Body> {
    send(
        app,
        builder(method, uri, cookie)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `name=value` part of the response's `Set-Cookie` header.
pub fn set_cookie_pair(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}
