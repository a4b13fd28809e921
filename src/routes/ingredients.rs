use axum::{
    Json,
    extract::{Path, Query, State},
};
use plateful_recipe::RecipeQuery;
use serde::Deserialize;

use crate::{error::AppError, routes::bodies::IngredientBody, server::AppState};

#[derive(Deserialize)]
pub struct IngredientsArgs {
    /// Name-prefix search.
    pub name: Option<String>,
}

pub async fn get_ingredients(
    State(state): State<AppState>,
    Query(args): Query<IngredientsArgs>,
) -> Result<Json<Vec<IngredientBody>>, AppError> {
    let query = RecipeQuery(state.read_db.clone());
    let ingredients = query.list_ingredients(args.name.as_deref()).await?;

    Ok(Json(
        ingredients.into_iter().map(IngredientBody::from).collect(),
    ))
}

pub async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<IngredientBody>, AppError> {
    let query = RecipeQuery(state.read_db.clone());
    let Some(ingredient) = query.find_ingredient(&id).await? else {
        return Err(plateful_shared::Error::NotFound("Ingredient not found.".to_owned()).into());
    };

    Ok(Json(ingredient.into()))
}
