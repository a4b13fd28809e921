use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::Query;
use plateful_recipe::{RecipeCommand, RecipeInput, RecipeQuery, RecipeRow, RecipesFilter};
use plateful_shared::{Page, PageArgs};
use plateful_user::{UserQuery, UserRow};
use serde::Deserialize;
use serde_json::json;
use std::collections::{HashMap, HashSet};

use crate::{
    auth::{AuthUser, MaybeUser},
    error::AppError,
    routes::bodies::{RecipeBody, RecipeIngredientBody, RecipeShortBody, TagBody, UserBody},
    server::AppState,
};

/// Join recipe rows with their tags, ingredient lines, authors and viewer
/// flags. Batched: one query per concern per page.
pub(crate) async fn assemble_recipes(
    state: &AppState,
    viewer: Option<&UserRow>,
    rows: Vec<RecipeRow>,
) -> Result<Vec<RecipeBody>, AppError> {
    let recipe_query = RecipeQuery(state.read_db.clone());
    let user_query = UserQuery(state.read_db.clone());

    let ids: Vec<String> = rows.iter().map(|r| r.id.to_owned()).collect();

    let mut tags_by_recipe: HashMap<String, Vec<TagBody>> = HashMap::new();
    for link in recipe_query.tags_for(&ids).await? {
        tags_by_recipe
            .entry(link.recipe_id.to_owned())
            .or_default()
            .push(TagBody {
                id: link.id,
                name: link.name,
                slug: link.slug,
            });
    }

    let mut lines_by_recipe: HashMap<String, Vec<RecipeIngredientBody>> = HashMap::new();
    for line in recipe_query.ingredient_lines_for(&ids).await? {
        lines_by_recipe
            .entry(line.recipe_id.to_owned())
            .or_default()
            .push(RecipeIngredientBody {
                id: line.ingredient_id,
                name: line.name,
                measurement_unit: line.measurement_unit,
                amount: line.amount,
            });
    }

    let author_ids: Vec<String> = rows
        .iter()
        .map(|r| r.author_id.to_owned())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let authors: HashMap<String, UserRow> = user_query
        .find_many(&author_ids)
        .await?
        .into_iter()
        .map(|u| (u.id.to_owned(), u))
        .collect();

    let (favorited, in_cart, subscribed): (HashSet<String>, HashSet<String>, HashSet<String>) =
        match viewer {
            Some(viewer) => (
                recipe_query
                    .favorited_ids(&viewer.id, &ids)
                    .await?
                    .into_iter()
                    .collect(),
                recipe_query
                    .in_cart_ids(&viewer.id, &ids)
                    .await?
                    .into_iter()
                    .collect(),
                user_query
                    .subscribed_ids(&viewer.id, &author_ids)
                    .await?
                    .into_iter()
                    .collect(),
            ),
            None => Default::default(),
        };

    rows.into_iter()
        .map(|row| {
            let author = authors.get(&row.author_id).ok_or_else(|| {
                anyhow::anyhow!("author {} missing for recipe {}", row.author_id, row.id)
            })?;

            Ok(RecipeBody {
                id: row.id.to_owned(),
                author: UserBody::from_row(author, subscribed.contains(&author.id)),
                name: row.name,
                image: row.image,
                description: row.description,
                ingredients: lines_by_recipe.remove(&row.id).unwrap_or_default(),
                tags: tags_by_recipe.remove(&row.id).unwrap_or_default(),
                cooking_time: row.cooking_time,
                is_favorited: favorited.contains(&row.id),
                is_in_shopping_cart: in_cart.contains(&row.id),
            })
        })
        .collect()
}

async fn assemble_one(
    state: &AppState,
    viewer: Option<&UserRow>,
    row: RecipeRow,
) -> Result<RecipeBody, AppError> {
    let mut bodies = assemble_recipes(state, viewer, vec![row]).await?;
    bodies
        .pop()
        .ok_or_else(|| anyhow::anyhow!("recipe body assembly returned nothing").into())
}

#[derive(Deserialize)]
pub struct RecipesArgs {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub author: Option<String>,
    /// Tag slugs; repeatable, matched as OR.
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<u8>,
    pub is_in_shopping_cart: Option<u8>,
}

pub async fn get_recipes(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Query(args): Query<RecipesArgs>,
) -> Result<Json<Page<RecipeBody>>, AppError> {
    let page_args = PageArgs {
        page: args.page,
        limit: args.limit,
    };

    let mut filter = RecipesFilter {
        author: args.author,
        tags: args.tags,
        ..Default::default()
    };

    // The membership filters only mean something for an authenticated caller.
    if let Some(viewer) = &viewer {
        if args.is_favorited == Some(1) {
            filter.favorited_by = Some(viewer.id.to_owned());
        }
        if args.is_in_shopping_cart == Some(1) {
            filter.in_cart_of = Some(viewer.id.to_owned());
        }
    }

    let query = RecipeQuery(state.read_db.clone());
    let (count, rows) = query.list(&filter, &page_args).await?;
    let results = assemble_recipes(&state, viewer.as_ref(), rows).await?;

    Ok(Json(Page::new(count, results, &page_args, "/api/recipes")))
}

pub async fn post_recipes(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(input): Json<RecipeInput>,
) -> Result<(StatusCode, Json<RecipeBody>), AppError> {
    let command = RecipeCommand::new(state.read_db.clone(), state.write_db.clone());
    let id = command.create(&user.id, input).await?;

    let query = RecipeQuery(state.read_db.clone());
    let row = query
        .find(&id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("recipe {id} vanished right after creation"))?;

    let body = assemble_one(&state, Some(&user), row).await?;

    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<String>,
) -> Result<Json<RecipeBody>, AppError> {
    let query = RecipeQuery(state.read_db.clone());
    let Some(row) = query.find(&id).await? else {
        return Err(plateful_shared::Error::NotFound("Recipe not found.".to_owned()).into());
    };

    let body = assemble_one(&state, viewer.as_ref(), row).await?;

    Ok(Json(body))
}

pub async fn patch_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(input): Json<RecipeInput>,
) -> Result<Json<RecipeBody>, AppError> {
    let command = RecipeCommand::new(state.read_db.clone(), state.write_db.clone());
    command.update(&user.id, &id, input).await?;

    let query = RecipeQuery(state.read_db.clone());
    let row = query
        .find(&id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("recipe {id} vanished during update"))?;

    let body = assemble_one(&state, Some(&user), row).await?;

    Ok(Json(body))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let command = RecipeCommand::new(state.read_db.clone(), state.write_db.clone());
    command.delete(&user.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_link(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let query = RecipeQuery(state.read_db.clone());
    if query.find(&id).await?.is_none() {
        return Err(plateful_shared::Error::NotFound("Recipe not found.".to_owned()).into());
    }

    let short_link = format!("{}/s/{}", state.config.server.base_url, id);

    Ok(Json(json!({ "short-link": short_link })))
}

pub async fn post_favorite(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<RecipeShortBody>), AppError> {
    let command = RecipeCommand::new(state.read_db.clone(), state.write_db.clone());
    let recipe = command.favorite(&user.id, &id).await?;

    Ok((StatusCode::CREATED, Json(RecipeShortBody::from(&recipe))))
}

pub async fn delete_favorite(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let command = RecipeCommand::new(state.read_db.clone(), state.write_db.clone());
    command.unfavorite(&user.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn post_shopping_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<RecipeShortBody>), AppError> {
    let command = RecipeCommand::new(state.read_db.clone(), state.write_db.clone());
    let recipe = command.cart_add(&user.id, &id).await?;

    Ok((StatusCode::CREATED, Json(RecipeShortBody::from(&recipe))))
}

pub async fn delete_shopping_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let command = RecipeCommand::new(state.read_db.clone(), state.write_db.clone());
    command.cart_remove(&user.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
