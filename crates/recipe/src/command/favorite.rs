use plateful_db::table::Favorite;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;

use crate::RecipeRow;

impl super::RecipeCommand {
    pub async fn favorite(
        &self,
        user_id: &str,
        recipe_id: &str,
    ) -> plateful_shared::Result<RecipeRow> {
        let query = crate::RecipeQuery(self.read_db.clone());
        let Some(recipe) = query.find(recipe_id).await? else {
            plateful_shared::not_found!("Recipe not found.");
        };

        let statement = Query::select()
            .column(Favorite::RecipeId)
            .from(Favorite::Table)
            .and_where(Expr::col(Favorite::UserId).eq(user_id))
            .and_where(Expr::col(Favorite::RecipeId).eq(&recipe.id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        if sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
            .is_some()
        {
            plateful_shared::invalid!("Recipe is already in favorites.");
        }

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(Favorite::Table)
            .columns([Favorite::UserId, Favorite::RecipeId, Favorite::CreatedAt])
            .values_panic([user_id.into(), recipe.id.to_owned().into(), now.into()])
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(recipe)
    }

    pub async fn unfavorite(&self, user_id: &str, recipe_id: &str) -> plateful_shared::Result<()> {
        let statement = Query::delete()
            .from_table(Favorite::Table)
            .and_where(Expr::col(Favorite::UserId).eq(user_id))
            .and_where(Expr::col(Favorite::RecipeId).eq(recipe_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            plateful_shared::invalid!("Recipe is not in favorites.");
        }

        Ok(())
    }
}
