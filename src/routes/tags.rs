use axum::{
    Json,
    extract::{Path, State},
};
use plateful_recipe::RecipeQuery;

use crate::{error::AppError, routes::bodies::TagBody, server::AppState};

pub async fn get_tags(State(state): State<AppState>) -> Result<Json<Vec<TagBody>>, AppError> {
    let query = RecipeQuery(state.read_db.clone());
    let tags = query.list_tags().await?;

    Ok(Json(tags.into_iter().map(TagBody::from).collect()))
}

pub async fn get_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TagBody>, AppError> {
    let query = RecipeQuery(state.read_db.clone());
    let Some(tag) = query.find_tag(&id).await? else {
        return Err(plateful_shared::Error::NotFound("Tag not found.".to_owned()).into());
    };

    Ok(Json(tag.into()))
}
