use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use argon2::Params;
use serde_json::{Value, json};

use blog_core::domain::AdminPolicy;
use blog_infra::{
    Argon2PasswordService, DatabaseConfig, InMemorySessionStore, JwtConfig, JwtTokenService,
    connect, create_schema,
};

use super::configure_routes;
use crate::middleware::error::{EMAIL_TAKEN, LOGIN_TO_COMMENT, UNKNOWN_EMAIL, WRONG_PASSWORD};
use crate::state::AppState;

async fn test_state() -> AppState {
    let db = connect(&DatabaseConfig::in_memory()).await.unwrap();
    create_schema(&db).await.unwrap();

    let tokens = JwtTokenService::new(JwtConfig {
        secret: "handler-test-secret".to_string(),
        expiration_hours: 1,
        issuer: "handler-test".to_string(),
    });
    let passwords = Argon2PasswordService::with_params(Params::new(1024, 1, 1, None).unwrap());

    AppState::from_parts(
        db,
        Arc::new(tokens),
        Arc::new(passwords),
        Arc::new(InMemorySessionStore::new()),
        AdminPolicy::FirstAccount,
    )
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(test_state().await))
                .configure(configure_routes),
        )
        .await
    };
}

/// Register an account and return its bearer token.
macro_rules! register {
    ($app:expr, $email:expr, $name:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "email": $email, "name": $name, "password": "password-123" }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body["data"]["access_token"].as_str().unwrap().to_string()
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

fn post_body(title: &str) -> Value {
    json!({
        "title": title,
        "subtitle": "A subtitle",
        "body": "<p>Body</p>",
        "img_url": "https://images.example.com/cover.jpg",
    })
}

#[actix_web::test]
async fn test_health() {
    let app = app!();

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}

#[actix_web::test]
async fn test_register_duplicate_email() {
    let app = app!();
    register!(app, "a@example.com", "Alice");

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "a@example.com", "name": "Again", "password": "password-123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], EMAIL_TAKEN);
}

#[actix_web::test]
async fn test_register_validation() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "a@example.com", "name": "   ", "password": "pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_short_password_registers_and_logs_in() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "ann@example.com", "name": "Ann", "password": "abc" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "ann@example.com", "password": "abc" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_login_messages() {
    let app = app!();
    register!(app, "a@example.com", "Alice");

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "nobody@example.com", "password": "password-123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], UNKNOWN_EMAIL);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "a@example.com", "password": "password-999" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], WRONG_PASSWORD);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "a@example.com", "password": "password-123" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["user"]["id"], 1);
}

#[actix_web::test]
async fn test_me_and_logout() {
    let app = app!();
    let token = register!(app, "a@example.com", "Alice");

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["role"], "admin");
    assert!(body["data"].get("password_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Logging out again, or without a session, still succeeds.
    let req = test::TestRequest::post()
        .uri("/api/auth/logout")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn test_post_lifecycle() {
    let app = app!();
    let admin = register!(app, "a@example.com", "Alice");
    let member = register!(app, "b@example.com", "Bob");

    // Only the administrator may publish.
    for auth in [None, Some(&member)] {
        let mut req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(post_body("Hello"));
        if let Some(token) = auth {
            req = req.insert_header(bearer(token));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&admin))
        .set_json(post_body("Hello"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let post_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["author"]["name"], "Alice");

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&admin))
        .set_json(post_body("Hello"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Anonymous comments are refused.
    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/comments"))
        .set_json(json!({ "body": "hi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], LOGIN_TO_COMMENT);

    let req = test::TestRequest::post()
        .uri(&format!("/api/posts/{post_id}/comments"))
        .insert_header(bearer(&member))
        .set_json(json!({ "body": "hi" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Hello");
    assert_eq!(body["data"]["comments"][0]["author"]["name"], "Bob");
    assert!(body["data"]["date"].as_str().unwrap().contains(", "));

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(bearer(&member))
        .set_json(post_body("Hijacked"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(bearer(&admin))
        .set_json(post_body("Hello again"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Hello again");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(bearer(&member))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/posts/{post_id}"))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{post_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/users/2/comments")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_user_posts() {
    let app = app!();
    let admin = register!(app, "a@example.com", "Alice");

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&admin))
        .set_json(post_body("Mine"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get().uri("/api/users/1/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["title"], "Mine");
    assert_eq!(body["data"][0]["author"]["id"], 1);

    let req = test::TestRequest::get().uri("/api/users/9/posts").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_malformed_json_is_problem_details() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn test_unparsable_path_is_problem_details() {
    let app = app!();

    let req = test::TestRequest::get().uri("/api/posts/abc").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
}
