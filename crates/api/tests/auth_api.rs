//! HTTP-level integration tests for the `/auth` endpoints.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_user, get, get_with_cookie, post_json, set_cookie_pair,
    TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_sets_cookie_and_me_resolves_it(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/auth/register",
        json!({
            "email": "  New.Shopper@Example.com ",
            "password": "long-enough",
            "firstName": "New",
            "lastName": "Shopper"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    let cookie = set_cookie_pair(&response).unwrap();
    assert!(cookie.starts_with("auth-token="));

    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "new.shopper@example.com");
    assert_eq!(json["user"]["role"], "customer");
    assert!(json["user"].get("passwordHash").is_none());

    let json = body_json(get_with_cookie(app, "/api/auth/me", &cookie).await).await;
    assert_eq!(json["user"]["email"], "new.shopper@example.com");
    assert_eq!(json["user"]["firstName"], "New");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_validation_and_duplicates(pool: PgPool) {
    create_user(&pool, "taken@example.com", "customer").await;
    let app = build_test_app(pool);

    let short = json!({
        "email": "short@example.com", "password": "short",
        "firstName": "S", "lastName": "P"
    });
    let response = post_json(app.clone(), "/api/auth/register", short).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bad_email = json!({
        "email": "not-an-email", "password": "long-enough",
        "firstName": "S", "lastName": "P"
    });
    let response = post_json(app.clone(), "/api/auth/register", bad_email).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let duplicate = json!({
        "email": "TAKEN@example.com", "password": "long-enough",
        "firstName": "S", "lastName": "P"
    });
    let response = post_json(app, "/api/auth/register", duplicate).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success_and_failures(pool: PgPool) {
    let user = create_user(&pool, "login@example.com", "admin").await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/auth/login",
        json!({ "email": "LOGIN@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie_pair(&response).is_some());
    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "admin");

    let response = post_json(
        app.clone(),
        "/api/auth/login",
        json!({ "email": "login@example.com", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());

    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "ghost@example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_clears_cookie(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(app, "/api/auth/logout", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("auth-token=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_without_valid_session_is_null(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app.clone(), "/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["user"].is_null());

    let response = get_with_cookie(app, "/api/auth/me", "auth-token=tampered").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["user"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_auth_bodies_return_validation_errors(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/auth/login",
        json!({ "email": 42, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json.get("user").is_none());

    let response = post_json(app, "/api/auth/register", json!(["not", "an", "object"])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
