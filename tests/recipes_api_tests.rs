use axum::http::StatusCode;
use serde_json::json;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn recipe_crud_over_http() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;
    let (breakfast, salt, sugar) = helpers::seed_reference_data(&app).await?;
    let (_, token) = helpers::register_and_login(&app, "chef").await?;

    let (status, body) = helpers::request(
        &app,
        "POST",
        "/api/recipes",
        Some(&token),
        Some(json!({
            "name": "Caramel",
            "image": "data:image/png;base64,aGVsbG8=",
            "description": "Melt and stir.",
            "ingredients": [
                { "id": salt, "amount": 2 },
                { "id": sugar, "amount": 200 },
            ],
            "tags": [breakfast],
            "cooking_time": 25,
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let recipe_id = body["id"].as_str().unwrap().to_owned();
    assert_eq!(body["author"]["username"], "chef");
    assert_eq!(body["cooking_time"], 25);
    assert_eq!(body["tags"][0]["slug"], "breakfast");
    assert_eq!(body["ingredients"].as_array().unwrap().len(), 2);
    assert_eq!(body["is_favorited"], false);
    assert_eq!(body["is_in_shopping_cart"], false);

    let (status, body) = helpers::request(
        &app,
        "GET",
        &format!("/api/recipes/{recipe_id}"),
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Caramel");

    let (status, body) = helpers::request(
        &app,
        "PATCH",
        &format!("/api/recipes/{recipe_id}"),
        Some(&token),
        Some(json!({
            "name": "Salted caramel",
            "image": "data:image/png;base64,aGVsbG8=",
            "description": "Melt, stir, salt.",
            "ingredients": [{ "id": salt, "amount": 5 }],
            "tags": [],
            "cooking_time": 30,
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Salted caramel");
    assert_eq!(body["ingredients"].as_array().unwrap().len(), 1);
    assert_eq!(body["tags"].as_array().unwrap().len(), 0);

    let (status, _) = helpers::request(
        &app,
        "DELETE",
        &format!("/api/recipes/{recipe_id}"),
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = helpers::request(
        &app,
        "GET",
        &format!("/api/recipes/{recipe_id}"),
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn only_the_author_may_mutate_over_http() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;
    let (_, salt, _) = helpers::seed_reference_data(&app).await?;
    let (_, author_token) = helpers::register_and_login(&app, "author").await?;
    let (_, stranger_token) = helpers::register_and_login(&app, "stranger").await?;

    let (_, body) = helpers::request(
        &app,
        "POST",
        "/api/recipes",
        Some(&author_token),
        Some(json!({
            "name": "Guarded",
            "image": "data:image/png;base64,aGVsbG8=",
            "description": "Secret.",
            "ingredients": [{ "id": salt, "amount": 1 }],
            "tags": [],
            "cooking_time": 10,
        })),
    )
    .await?;
    let recipe_id = body["id"].as_str().unwrap().to_owned();

    let (status, body) = helpers::request(
        &app,
        "DELETE",
        &format!("/api/recipes/{recipe_id}"),
        Some(&stranger_token),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["detail"],
        "You do not have permission to perform this action."
    );

    let (status, _) = helpers::request(
        &app,
        "DELETE",
        &format!("/api/recipes/{recipe_id}"),
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn listing_filters_by_tag_and_favorites() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;
    let (breakfast, salt, sugar) = helpers::seed_reference_data(&app).await?;
    let (_, token) = helpers::register_and_login(&app, "curator").await?;

    let (_, tagged) = helpers::request(
        &app,
        "POST",
        "/api/recipes",
        Some(&token),
        Some(json!({
            "name": "Porridge",
            "image": "data:image/png;base64,aGVsbG8=",
            "description": "Morning staple.",
            "ingredients": [{ "id": salt, "amount": 1 }],
            "tags": [breakfast],
            "cooking_time": 15,
        })),
    )
    .await?;
    let tagged_id = tagged["id"].as_str().unwrap().to_owned();

    helpers::request(
        &app,
        "POST",
        "/api/recipes",
        Some(&token),
        Some(json!({
            "name": "Candy",
            "image": "data:image/png;base64,aGVsbG8=",
            "description": "Pure sugar.",
            "ingredients": [{ "id": sugar, "amount": 50 }],
            "tags": [],
            "cooking_time": 5,
        })),
    )
    .await?;

    let (status, body) =
        helpers::request(&app, "GET", "/api/recipes?tags=breakfast", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["id"], tagged_id.as_str());

    // Favorite filter only bites for the authenticated caller.
    helpers::request(
        &app,
        "POST",
        &format!("/api/recipes/{tagged_id}/favorite"),
        Some(&token),
        None,
    )
    .await?;

    let (_, body) = helpers::request(
        &app,
        "GET",
        "/api/recipes?is_favorited=1",
        Some(&token),
        None,
    )
    .await?;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["is_favorited"], true);

    let (_, body) =
        helpers::request(&app, "GET", "/api/recipes?is_favorited=1", None, None).await?;
    assert_eq!(body["count"], 2);

    Ok(())
}

#[tokio::test]
async fn short_links_resolve_from_config() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;
    let (_, salt, _) = helpers::seed_reference_data(&app).await?;
    let (_, token) = helpers::register_and_login(&app, "linker").await?;

    let (_, body) = helpers::request(
        &app,
        "POST",
        "/api/recipes",
        Some(&token),
        Some(json!({
            "name": "Linked",
            "image": "data:image/png;base64,aGVsbG8=",
            "description": "Shareable.",
            "ingredients": [{ "id": salt, "amount": 1 }],
            "tags": [],
            "cooking_time": 10,
        })),
    )
    .await?;
    let recipe_id = body["id"].as_str().unwrap().to_owned();

    let (status, body) = helpers::request(
        &app,
        "GET",
        &format!("/api/recipes/{recipe_id}/get-link"),
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["short-link"],
        format!("http://plateful.localhost/s/{recipe_id}")
    );

    Ok(())
}

#[tokio::test]
async fn reference_data_endpoints_are_public() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = helpers::setup_app(dir.child("db.sqlite3")).await?;
    let (_, salt, _) = helpers::seed_reference_data(&app).await?;

    let (status, body) = helpers::request(&app, "GET", "/api/tags", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["slug"], "breakfast");

    let (status, body) =
        helpers::request(&app, "GET", "/api/ingredients?name=Sa", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Salt");

    let (status, body) = helpers::request(
        &app,
        "GET",
        &format!("/api/ingredients/{salt}"),
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["measurement_unit"], "g");

    Ok(())
}
