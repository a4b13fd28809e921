use axum::http::StatusCode;
use serde_json::json;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn register_login_me_roundtrip() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;

    let (status, body) = helpers::request(
        &app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "email": "chef@plateful.localhost",
            "username": "chef",
            "first_name": "Julia",
            "last_name": "Child",
            "password": "my_password",
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "chef");
    assert!(body.get("password").is_none());

    let (status, body) = helpers::request(
        &app,
        "POST",
        "/api/auth/token/login",
        None,
        Some(json!({ "email": "chef@plateful.localhost", "password": "my_password" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["auth_token"].as_str().unwrap().to_owned();

    let (status, body) = helpers::request(&app, "GET", "/api/users/me", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "chef@plateful.localhost");
    assert_eq!(body["is_subscribed"], false);

    let (status, _) = helpers::request(&app, "GET", "/api/users/me", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn duplicate_registration_is_a_400() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;

    helpers::register_and_login(&app, "dup").await?;

    let (status, body) = helpers::request(
        &app,
        "POST",
        "/api/users",
        None,
        Some(json!({
            "email": "dup@plateful.localhost",
            "username": "dup2",
            "first_name": "John",
            "last_name": "Doe",
            "password": "my_password",
        })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "A user with that email already exists.");

    Ok(())
}

#[tokio::test]
async fn wrong_credentials_are_a_400() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;

    helpers::register_and_login(&app, "locked").await?;

    let (status, body) = helpers::request(
        &app,
        "POST",
        "/api/auth/token/login",
        None,
        Some(json!({ "email": "locked@plateful.localhost", "password": "wrong" })),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid email or password.");

    Ok(())
}

#[tokio::test]
async fn user_listing_is_paginated_and_public() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;

    for name in ["alba", "brie", "carl"] {
        helpers::register_and_login(&app, name).await?;
    }

    let (status, body) =
        helpers::request(&app, "GET", "/api/users?limit=2", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["results"][0]["username"], "alba");
    assert_eq!(body["next"], "/api/users?page=2&limit=2");
    assert_eq!(body["previous"], serde_json::Value::Null);

    Ok(())
}

#[tokio::test]
async fn subscription_flow_over_http() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;

    let (_follower_id, follower_token) = helpers::register_and_login(&app, "follower").await?;
    let (author_id, _) = helpers::register_and_login(&app, "author").await?;

    let (status, body) = helpers::request(
        &app,
        "POST",
        &format!("/api/users/{author_id}/subscribe"),
        Some(&follower_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "author");
    assert_eq!(body["is_subscribed"], true);
    assert_eq!(body["recipes_count"], 0);

    let (status, body) = helpers::request(
        &app,
        "POST",
        &format!("/api/users/{author_id}/subscribe"),
        Some(&follower_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Subscription already exists.");

    let (status, body) = helpers::request(
        &app,
        "GET",
        "/api/users/subscriptions",
        Some(&follower_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["username"], "author");

    let (status, _) = helpers::request(
        &app,
        "DELETE",
        &format!("/api/users/{author_id}/subscribe"),
        Some(&follower_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    Ok(())
}

#[tokio::test]
async fn avatar_and_password_endpoints() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;

    let (_, token) = helpers::register_and_login(&app, "styled").await?;

    let (status, body) = helpers::request(
        &app,
        "PUT",
        "/api/users/me/avatar",
        Some(&token),
        Some(json!({ "avatar": "data:image/png;base64,aGVsbG8=" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["avatar"], "data:image/png;base64,aGVsbG8=");

    let (status, _) =
        helpers::request(&app, "DELETE", "/api/users/me/avatar", Some(&token), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) =
        helpers::request(&app, "DELETE", "/api/users/me/avatar", Some(&token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Avatar not found.");

    let (status, _) = helpers::request(
        &app,
        "POST",
        "/api/users/set_password",
        Some(&token),
        Some(json!({ "new_password": "my_new_password", "current_password": "my_password" })),
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = helpers::request(
        &app,
        "POST",
        "/api/auth/token/login",
        None,
        Some(json!({ "email": "styled@plateful.localhost", "password": "my_new_password" })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}
