mod author;
mod detail;
mod list;
mod reference;

pub use list::RecipesFilter;

use plateful_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;

use crate::RecipeRow;

#[derive(Clone)]
pub struct RecipeQuery(pub SqlitePool);

impl RecipeQuery {
    pub async fn find(&self, id: &str) -> plateful_shared::Result<Option<RecipeRow>> {
        let statement = Query::select()
            .columns([
                Recipe::Id,
                Recipe::AuthorId,
                Recipe::Name,
                Recipe::Image,
                Recipe::Description,
                Recipe::CookingTime,
                Recipe::CreatedAt,
            ])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}
