//! Response body shapes, converted from domain rows.

use plateful_recipe::{IngredientRow, RecipeRow, TagRow};
use plateful_user::UserRow;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub avatar: Option<String>,
}

impl UserBody {
    pub fn from_row(row: &UserRow, is_subscribed: bool) -> Self {
        Self {
            id: row.id.to_owned(),
            email: row.email.to_owned(),
            username: row.username.to_owned(),
            first_name: row.first_name.to_owned(),
            last_name: row.last_name.to_owned(),
            is_subscribed,
            avatar: row.avatar.to_owned(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TagBody {
    pub id: String,
    pub name: String,
    pub slug: String,
}

impl From<TagRow> for TagBody {
    fn from(row: TagRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngredientBody {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
}

impl From<IngredientRow> for IngredientBody {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            measurement_unit: row.measurement_unit,
        }
    }
}

/// An ingredient line within a recipe body, carrying the current reference
/// data next to the recipe-specific amount.
#[derive(Debug, Serialize)]
pub struct RecipeIngredientBody {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Trimmed recipe shape used by favorite/cart confirmations and the
/// subscriptions listing.
#[derive(Debug, Serialize)]
pub struct RecipeShortBody {
    pub id: String,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

impl From<&RecipeRow> for RecipeShortBody {
    fn from(row: &RecipeRow) -> Self {
        Self {
            id: row.id.to_owned(),
            name: row.name.to_owned(),
            image: row.image.to_owned(),
            cooking_time: row.cooking_time,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeBody {
    pub id: String,
    pub author: UserBody,
    pub name: String,
    pub image: String,
    pub description: String,
    pub ingredients: Vec<RecipeIngredientBody>,
    pub tags: Vec<TagBody>,
    pub cooking_time: i64,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}
