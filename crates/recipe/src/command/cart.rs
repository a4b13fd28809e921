use plateful_db::table::CartEntry;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;

use crate::RecipeRow;

impl super::RecipeCommand {
    /// Put a recipe on the user's shopping cart. Unique per (user, recipe);
    /// adding twice is rejected, never duplicated.
    pub async fn cart_add(
        &self,
        user_id: &str,
        recipe_id: &str,
    ) -> plateful_shared::Result<RecipeRow> {
        let query = crate::RecipeQuery(self.read_db.clone());
        let Some(recipe) = query.find(recipe_id).await? else {
            plateful_shared::not_found!("Recipe not found.");
        };

        let statement = Query::select()
            .column(CartEntry::RecipeId)
            .from(CartEntry::Table)
            .and_where(Expr::col(CartEntry::UserId).eq(user_id))
            .and_where(Expr::col(CartEntry::RecipeId).eq(&recipe.id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        if sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
            .is_some()
        {
            plateful_shared::invalid!("Recipe is already in the shopping cart.");
        }

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(CartEntry::Table)
            .columns([CartEntry::UserId, CartEntry::RecipeId, CartEntry::CreatedAt])
            .values_panic([user_id.into(), recipe.id.to_owned().into(), now.into()])
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(recipe)
    }

    pub async fn cart_remove(&self, user_id: &str, recipe_id: &str) -> plateful_shared::Result<()> {
        let statement = Query::delete()
            .from_table(CartEntry::Table)
            .and_where(Expr::col(CartEntry::UserId).eq(user_id))
            .and_where(Expr::col(CartEntry::RecipeId).eq(recipe_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            plateful_shared::invalid!("Recipe is not in the shopping cart.");
        }

        Ok(())
    }
}
