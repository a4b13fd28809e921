use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct IngredientLineInput {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(range(min = 1))]
    pub amount: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(min = 1))]
    pub image: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(nested, length(min = 1, message = "At least one ingredient is required."))]
    pub ingredients: Vec<IngredientLineInput>,
    pub tags: Vec<String>,
    #[validate(range(min = 1))]
    pub cooking_time: u32,
}

#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: String,
    pub author_id: String,
    pub name: String,
    pub image: String,
    pub description: String,
    pub cooking_time: i64,
    pub created_at: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct TagRow {
    pub id: String,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct IngredientRow {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
}

/// An ingredient line joined with its current reference data.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeIngredientRow {
    pub recipe_id: String,
    pub ingredient_id: String,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// A tag link carrying the tag fields, keyed by recipe for page assembly.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeTagRow {
    pub recipe_id: String,
    pub id: String,
    pub name: String,
    pub slug: String,
}
