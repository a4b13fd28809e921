mod cart;
mod create;
mod delete;
mod favorite;
mod seed;
mod update;

use sqlx::SqlitePool;

use crate::RecipeRow;

#[derive(Clone)]
pub struct RecipeCommand {
    pub read_db: SqlitePool,
    pub write_db: SqlitePool,
}

impl RecipeCommand {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self { read_db, write_db }
    }

    /// Fetch a recipe and enforce author-only access for mutations.
    pub(crate) async fn find_owned(
        &self,
        author_id: &str,
        recipe_id: &str,
    ) -> plateful_shared::Result<RecipeRow> {
        let query = crate::RecipeQuery(self.read_db.clone());
        let Some(recipe) = query.find(recipe_id).await? else {
            plateful_shared::not_found!("Recipe not found.");
        };

        if recipe.author_id != author_id {
            return Err(plateful_shared::Error::Forbidden);
        }

        Ok(recipe)
    }
}
