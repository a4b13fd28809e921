use plateful_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::RecipeCommand {
    /// Delete a recipe. Ingredient lines, tag links, favorites and cart
    /// entries go with it via cascade.
    pub async fn delete(&self, author_id: &str, recipe_id: &str) -> plateful_shared::Result<()> {
        let recipe = self.find_owned(author_id, recipe_id).await?;

        let statement = Query::delete()
            .from_table(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(&recipe.id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }
}
