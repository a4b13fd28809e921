use axum::http::{StatusCode, header};
use serde_json::json;
use temp_dir::TempDir;

mod helpers;

async fn create_recipe(
    app: &helpers::TestApp,
    token: &str,
    name: &str,
    ingredients: serde_json::Value,
) -> anyhow::Result<String> {
    let (status, body) = helpers::request(
        app,
        "POST",
        "/api/recipes",
        Some(token),
        Some(json!({
            "name": name,
            "image": "data:image/png;base64,aGVsbG8=",
            "description": format!("How to cook {name}"),
            "ingredients": ingredients,
            "tags": [],
            "cooking_time": 20,
        })),
    )
    .await?;
    anyhow::ensure!(status == StatusCode::CREATED, "create failed: {body}");

    Ok(body["id"].as_str().unwrap().to_owned())
}

#[tokio::test]
async fn download_aggregates_the_whole_cart() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;
    let (_, salt, sugar) = helpers::seed_reference_data(&app).await?;
    let (_, token) = helpers::register_and_login(&app, "shopper").await?;

    let soup = create_recipe(&app, &token, "Soup", json!([{ "id": salt, "amount": 10 }])).await?;
    let caramel = create_recipe(
        &app,
        &token,
        "Caramel",
        json!([{ "id": salt, "amount": 15 }, { "id": sugar, "amount": 100 }]),
    )
    .await?;

    for id in [&soup, &caramel] {
        let (status, _) = helpers::request(
            &app,
            "POST",
            &format!("/api/recipes/{id}/shopping_cart"),
            Some(&token),
            None,
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, headers, body) = helpers::request_raw(
        &app,
        "GET",
        "/api/recipes/download_shopping_cart",
        Some(&token),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get(header::CONTENT_TYPE).unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(
        headers.get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=shopping_list.txt"
    );
    assert_eq!(body, "Shopping list:\nSalt - 25 g.\nSugar - 100 g.");

    Ok(())
}

#[tokio::test]
async fn download_requires_authentication() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;

    let (status, _, _) =
        helpers::request_raw(&app, "GET", "/api/recipes/download_shopping_cart", None).await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn empty_cart_downloads_the_bare_header() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;
    let (_, token) = helpers::register_and_login(&app, "idle").await?;

    let (status, _, body) = helpers::request_raw(
        &app,
        "GET",
        "/api/recipes/download_shopping_cart",
        Some(&token),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Shopping list:\n");

    Ok(())
}

#[tokio::test]
async fn cart_removal_is_reflected_in_the_next_download() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;
    let (_, salt, sugar) = helpers::seed_reference_data(&app).await?;
    let (_, token) = helpers::register_and_login(&app, "changer").await?;

    let soup = create_recipe(&app, &token, "Soup", json!([{ "id": salt, "amount": 10 }])).await?;
    let cake = create_recipe(&app, &token, "Cake", json!([{ "id": sugar, "amount": 200 }])).await?;

    for id in [&soup, &cake] {
        helpers::request(
            &app,
            "POST",
            &format!("/api/recipes/{id}/shopping_cart"),
            Some(&token),
            None,
        )
        .await?;
    }

    let (status, _) = helpers::request(
        &app,
        "DELETE",
        &format!("/api/recipes/{cake}/shopping_cart"),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, _, body) = helpers::request_raw(
        &app,
        "GET",
        "/api/recipes/download_shopping_cart",
        Some(&token),
    )
    .await?;
    assert_eq!(body, "Shopping list:\nSalt - 10 g.");

    // Idempotent: downloading again without state changes is byte-identical.
    let (_, _, again) = helpers::request_raw(
        &app,
        "GET",
        "/api/recipes/download_shopping_cart",
        Some(&token),
    )
    .await?;
    assert_eq!(again, body);

    Ok(())
}

#[tokio::test]
async fn duplicate_cart_entries_are_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;
    let (_, salt, _) = helpers::seed_reference_data(&app).await?;
    let (_, token) = helpers::register_and_login(&app, "repeat").await?;

    let soup = create_recipe(&app, &token, "Soup", json!([{ "id": salt, "amount": 10 }])).await?;

    let (status, body) = helpers::request(
        &app,
        "POST",
        &format!("/api/recipes/{soup}/shopping_cart"),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Soup");

    let (status, body) = helpers::request(
        &app,
        "POST",
        &format!("/api/recipes/{soup}/shopping_cart"),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Recipe is already in the shopping cart.");

    Ok(())
}
