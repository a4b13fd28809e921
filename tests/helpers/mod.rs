use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};
use std::{path::PathBuf, str::FromStr};
use tower::ServiceExt;

use plateful::config::{Config, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig};

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
            base_url: "http://plateful.localhost".to_string(),
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_string(),
            expiration_days: 7,
        },
        observability: ObservabilityConfig::default(),
    }
}

pub async fn setup_app(path: PathBuf) -> anyhow::Result<TestApp> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;

    let mut conn = pool.acquire().await?;
    plateful_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    let state = plateful::AppState {
        read_db: pool.clone(),
        write_db: pool.clone(),
        config: test_config(),
    };

    Ok(TestApp {
        router: plateful::create_router(state),
        pool,
    })
}

/// Fire one request at the router and decode the JSON response (Null when
/// the body is empty).
pub async fn request(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, value))
}

/// Raw variant for non-JSON responses (the shopping list download).
#[allow(dead_code)]
pub async fn request_raw(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
) -> anyhow::Result<(StatusCode, axum::http::HeaderMap, String)> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let response = app
        .router
        .clone()
        .oneshot(builder.body(Body::empty())?)
        .await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok((status, headers, String::from_utf8(bytes.to_vec())?))
}

#[allow(dead_code)]
pub async fn register_and_login(
    app: &TestApp,
    name: &str,
) -> anyhow::Result<(String, String)> {
    let (status, registered) = request(
        app,
        "POST",
        "/api/users",
        None,
        Some(serde_json::json!({
            "email": format!("{name}@plateful.localhost"),
            "username": name,
            "first_name": "John",
            "last_name": "Doe",
            "password": "my_password",
        })),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::CREATED, "register failed: {registered}");

    let (status, body) = request(
        app,
        "POST",
        "/api/auth/token/login",
        None,
        Some(serde_json::json!({
            "email": format!("{name}@plateful.localhost"),
            "password": "my_password",
        })),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::OK, "login failed: {body}");

    let id = registered["id"].as_str().unwrap().to_owned();
    let token = body["auth_token"].as_str().unwrap().to_owned();

    Ok((id, token))
}

#[allow(dead_code)]
pub async fn seed_reference_data(app: &TestApp) -> anyhow::Result<(String, String, String)> {
    let cmd = plateful_recipe::RecipeCommand::new(app.pool.clone(), app.pool.clone());
    let breakfast = cmd.get_or_create_tag("Breakfast", "breakfast").await?;
    let salt = cmd.get_or_create_ingredient("Salt", "g").await?;
    let sugar = cmd.get_or_create_ingredient("Sugar", "g").await?;

    Ok((breakfast, salt, sugar))
}
