use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use plateful_recipe::RecipeQuery;
use plateful_shared::{Page, PageArgs};
use plateful_user::{Command, RegisterInput, SetPasswordInput, UserQuery};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;

use crate::{
    auth::{AuthUser, MaybeUser},
    error::AppError,
    routes::bodies::{RecipeShortBody, UserBody},
    server::AppState,
};

#[derive(Deserialize)]
pub struct RegisterBody {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisteredBody {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

pub async fn post_users(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<(StatusCode, Json<RegisteredBody>), AppError> {
    let command = Command::new(state.read_db.clone(), state.write_db.clone());
    let id = command
        .register(RegisterInput {
            email: body.email.to_owned(),
            username: body.username.to_owned(),
            first_name: body.first_name.to_owned(),
            last_name: body.last_name.to_owned(),
            password: body.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredBody {
            id,
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
        }),
    ))
}

pub async fn get_users(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Query(args): Query<PageArgs>,
) -> Result<Json<Page<UserBody>>, AppError> {
    let query = UserQuery(state.read_db.clone());
    let (count, rows) = query.list(&args).await?;

    let subscribed: HashSet<String> = match &viewer {
        Some(viewer) => {
            let ids: Vec<String> = rows.iter().map(|r| r.id.to_owned()).collect();
            query
                .subscribed_ids(&viewer.id, &ids)
                .await?
                .into_iter()
                .collect()
        }
        None => HashSet::new(),
    };

    let results = rows
        .iter()
        .map(|row| UserBody::from_row(row, subscribed.contains(&row.id)))
        .collect();

    Ok(Json(Page::new(count, results, &args, "/api/users")))
}

pub async fn get_user(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<String>,
) -> Result<Json<UserBody>, AppError> {
    let query = UserQuery(state.read_db.clone());
    let Some(user) = query.find(&id).await? else {
        return Err(plateful_shared::Error::NotFound("User not found.".to_owned()).into());
    };

    let is_subscribed = match &viewer {
        Some(viewer) => query.is_subscribed(&viewer.id, &user.id).await?,
        None => false,
    };

    Ok(Json(UserBody::from_row(&user, is_subscribed)))
}

pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserBody> {
    Json(UserBody::from_row(&user, false))
}

#[derive(Deserialize)]
pub struct SetPasswordBody {
    pub new_password: String,
    pub current_password: String,
}

pub async fn post_set_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<SetPasswordBody>,
) -> Result<StatusCode, AppError> {
    let command = Command::new(state.read_db.clone(), state.write_db.clone());
    command
        .set_password(
            &user.id,
            SetPasswordInput {
                new_password: body.new_password,
                current_password: body.current_password,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct AvatarBody {
    pub avatar: Option<String>,
}

pub async fn put_avatar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(body): Json<AvatarBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Some(avatar) = body.avatar else {
        return Err(
            plateful_shared::Error::Invalid("The avatar field is required.".to_owned()).into(),
        );
    };

    let command = Command::new(state.read_db.clone(), state.write_db.clone());
    command.set_avatar(&user.id, avatar.to_owned()).await?;

    Ok(Json(json!({ "avatar": avatar })))
}

pub async fn delete_avatar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode, AppError> {
    let command = Command::new(state.read_db.clone(), state.write_db.clone());
    command.delete_avatar(&user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct SubscriptionsArgs {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Trim each author's embedded recipe list.
    pub recipes_limit: Option<u64>,
}

/// An author in the subscriptions listing: the user body plus their recipes.
#[derive(Serialize)]
pub struct SubscriptionBody {
    #[serde(flatten)]
    pub user: UserBody,
    pub recipes: Vec<RecipeShortBody>,
    pub recipes_count: u64,
}

pub async fn get_subscriptions(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(args): Query<SubscriptionsArgs>,
) -> Result<Json<Page<SubscriptionBody>>, AppError> {
    let page_args = PageArgs {
        page: args.page,
        limit: args.limit,
    };

    let user_query = UserQuery(state.read_db.clone());
    let recipe_query = RecipeQuery(state.read_db.clone());
    let (count, authors) = user_query.subscriptions(&user.id, &page_args).await?;

    let mut results = Vec::with_capacity(authors.len());
    for author in &authors {
        let recipes = recipe_query
            .by_author(&author.id, args.recipes_limit)
            .await?;
        let recipes_count = recipe_query.count_by_author(&author.id).await?;

        results.push(SubscriptionBody {
            user: UserBody::from_row(author, true),
            recipes: recipes.iter().map(RecipeShortBody::from).collect(),
            recipes_count,
        });
    }

    Ok(Json(Page::new(
        count,
        results,
        &page_args,
        "/api/users/subscriptions",
    )))
}

pub async fn post_subscribe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<SubscriptionBody>), AppError> {
    let command = Command::new(state.read_db.clone(), state.write_db.clone());
    command.subscribe(&user.id, &id).await?;

    let user_query = UserQuery(state.read_db.clone());
    let recipe_query = RecipeQuery(state.read_db.clone());
    let author = user_query
        .find(&id)
        .await?
        .ok_or_else(|| plateful_shared::Error::NotFound("User not found.".to_owned()))?;
    let recipes = recipe_query.by_author(&author.id, None).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubscriptionBody {
            user: UserBody::from_row(&author, true),
            recipes_count: recipes.len() as u64,
            recipes: recipes.iter().map(RecipeShortBody::from).collect(),
        }),
    ))
}

pub async fn delete_subscribe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let command = Command::new(state.read_db.clone(), state.write_db.clone());
    command.unsubscribe(&user.id, &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
