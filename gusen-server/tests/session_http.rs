use anyhow::Result;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use gusen_model::{LoginId, routes::{HEALTH, v1}};
use serde_json::{Value, json};

#[path = "support/mod.rs"]
mod support;

use support::{bearer, build_test_app, default_users};

#[tokio::test]
async fn login_returns_a_bearer_token() -> Result<()> {
    let app = build_test_app(default_users(), Vec::new())?;

    let response = app
        .server
        .post(v1::auth::LOGIN)
        .json(&json!({ "login_id": "admin1", "password": "secret" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["token_type"], "Bearer");

    let token = body["data"]["token"].as_str().expect("token");
    let claims = app.tokens.validate(token)?;
    assert_eq!(claims.login_id, "ADMIN1");
    assert_eq!(claims.role, "ADMIN");
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> Result<()> {
    let app = build_test_app(default_users(), Vec::new())?;

    let response = app
        .server
        .post(v1::auth::LOGIN)
        .json(&json!({ "login_id": "ADMIN1", "password": "wrong" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["status"], 401);
    Ok(())
}

#[tokio::test]
async fn unknown_user_is_unauthorized() -> Result<()> {
    let app = build_test_app(default_users(), Vec::new())?;

    let response = app
        .server
        .post(v1::auth::LOGIN)
        .json(&json!({ "login_id": "GHOST", "password": "secret" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn non_admin_login_is_forbidden() -> Result<()> {
    let app = build_test_app(default_users(), Vec::new())?;

    let response = app
        .server
        .post(v1::auth::LOGIN)
        .json(&json!({ "login_id": "OPS01", "password": "ops-pass" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert!(body.get("data").is_none());
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_a_header() -> Result<()> {
    let app = build_test_app(default_users(), Vec::new())?;

    app.server
        .get(v1::users::COLLECTION)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    app.server
        .get(v1::logs::COLLECTION)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn malformed_authorization_headers_are_rejected() -> Result<()> {
    let app = build_test_app(default_users(), Vec::new())?;
    let token = app.admin_token().await;

    for header in [token.clone(), format!("bearer {token}"), "Bearer ".to_string()] {
        app.server
            .get(v1::users::COLLECTION)
            .add_header("Authorization", header)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
    Ok(())
}

#[tokio::test]
async fn expired_token_is_rejected() -> Result<()> {
    let app = build_test_app(default_users(), Vec::new())?;
    let admin = LoginId::parse("ADMIN1")?;
    let stale = app
        .tokens
        .issue_at(&admin, "ADMIN", Utc::now() - Duration::hours(3))?;

    app.server
        .get(v1::users::COLLECTION)
        .add_header("Authorization", bearer(&stale.token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn token_with_another_role_is_rejected() -> Result<()> {
    let app = build_test_app(default_users(), Vec::new())?;
    let operator = LoginId::parse("OPS01")?;
    let issued = app.tokens.issue(&operator, "OPERATOR")?;

    app.server
        .get(v1::users::COLLECTION)
        .add_header("Authorization", bearer(&issued.token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn token_from_another_key_is_rejected() -> Result<()> {
    let app = build_test_app(default_users(), Vec::new())?;
    let other = build_test_app(default_users(), Vec::new())?;
    let foreign = other.admin_token().await;

    app.server
        .get(v1::users::COLLECTION)
        .add_header("Authorization", bearer(&foreign))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn login_then_protected_call_succeeds() -> Result<()> {
    let app = build_test_app(default_users(), Vec::new())?;
    let token = app.admin_token().await;

    let response = app
        .server
        .get(v1::users::COLLECTION)
        .add_header("Authorization", bearer(&token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["total"], 2);
    Ok(())
}

#[tokio::test]
async fn health_is_public() -> Result<()> {
    let app = build_test_app(Vec::new(), Vec::new())?;

    let response = app.server.get(HEALTH).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    Ok(())
}
