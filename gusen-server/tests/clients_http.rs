use anyhow::Result;
use axum::http::StatusCode;
use gusen_core::database::ClientStore;
use gusen_model::routes::{utils as route_utils, v1};
use serde_json::{Value, json};

#[path = "support/mod.rs"]
mod support;

use support::{TestApp, bearer, build_test_app, default_users, identity};

fn clients_path(login_id: &str) -> String {
    route_utils::replace_param(v1::users::CLIENTS, "{login_id}", login_id)
}

fn codes(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["client_code"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

async fn ready() -> Result<(TestApp, String)> {
    let app = build_test_app(default_users(), Vec::new())?;
    let token = app.admin_token().await;
    Ok((app, bearer(&token)))
}

#[tokio::test]
async fn client_routes_require_a_session() -> Result<()> {
    let app = build_test_app(default_users(), Vec::new())?;

    for path in [
        clients_path("OPS01"),
        v1::clients::AVAILABLE.to_string(),
        v1::cities::COLLECTION.to_string(),
    ] {
        app.server
            .get(&path)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
    app.server
        .put(&clients_path("OPS01"))
        .json(&json!({ "client_code": "CL001" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn assigning_a_client_moves_it_out_of_the_available_list() -> Result<()> {
    let (app, auth) = ready().await?;

    let before = app
        .server
        .get(v1::clients::AVAILABLE)
        .add_header("Authorization", auth.clone())
        .await;
    before.assert_status_ok();
    assert_eq!(codes(&before.json()), vec!["CL001", "CL002", "CX900"]);

    let assigned = app
        .server
        .put(&clients_path("ops01"))
        .add_header("Authorization", auth.clone())
        .json(&json!({ "client_code": "CL002" }))
        .await;
    assigned.assert_status_ok();
    let body: Value = assigned.json();
    assert_eq!(body["data"]["login_id"], "OPS01");
    assert_eq!(body["data"]["created_by"], "ADMIN1");

    let held = app
        .server
        .get(&clients_path("OPS01"))
        .add_header("Authorization", auth.clone())
        .await;
    held.assert_status_ok();
    assert_eq!(codes(&held.json()), vec!["CL002"]);

    let after = app
        .server
        .get(v1::clients::AVAILABLE)
        .add_header("Authorization", auth)
        .await;
    assert_eq!(codes(&after.json()), vec!["CL001", "CX900"]);
    Ok(())
}

#[tokio::test]
async fn client_search_requires_a_code_fragment() -> Result<()> {
    let (app, auth) = ready().await?;

    app.server
        .get(v1::clients::COLLECTION)
        .add_header("Authorization", auth.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let found = app
        .server
        .get(&route_utils::with_query(
            v1::clients::COLLECTION,
            &[("client_code", "L00")],
        ))
        .add_header("Authorization", auth)
        .await;
    found.assert_status_ok();
    assert_eq!(codes(&found.json()), vec!["CL001", "CL002"]);
    Ok(())
}

#[tokio::test]
async fn held_client_cannot_be_taken_by_another_account() -> Result<()> {
    let mut users = default_users();
    users.push(identity("OPS02", "pw", "OPERATOR", 2));
    let app = build_test_app(users, Vec::new())?;
    let auth = bearer(&app.admin_token().await);

    app.server
        .put(&clients_path("OPS01"))
        .add_header("Authorization", auth.clone())
        .json(&json!({ "client_code": "CL001" }))
        .await
        .assert_status_ok();

    app.server
        .put(&clients_path("OPS02"))
        .add_header("Authorization", auth.clone())
        .json(&json!({ "client_code": "CL001" }))
        .await
        .assert_status(StatusCode::CONFLICT);

    app.server
        .put(&clients_path("OPS02"))
        .add_header("Authorization", auth.clone())
        .json(&json!({ "client_code": "MISSING" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .get(&clients_path("NOBODY"))
        .add_header("Authorization", auth)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let ops02 = gusen_model::LoginId::parse("OPS02")?;
    assert!(app.clients.assignments_for(&ops02).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn cities_are_listed_by_code() -> Result<()> {
    let (app, auth) = ready().await?;

    let response = app
        .server
        .get(v1::cities::COLLECTION)
        .add_header("Authorization", auth)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"][0]["city_code"], 1);
    assert_eq!(body["data"][0]["city_name"], "Jakarta");
    assert_eq!(body["data"][1]["province_name"], "Jawa Barat");
    Ok(())
}
