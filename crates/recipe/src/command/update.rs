use plateful_db::table::{Recipe, RecipeIngredient, RecipeTag};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

use crate::RecipeInput;

impl super::RecipeCommand {
    /// Full replace of the recipe fields, ingredient lines and tag links.
    /// Only the author may update.
    pub async fn update(
        &self,
        author_id: &str,
        recipe_id: &str,
        input: RecipeInput,
    ) -> plateful_shared::Result<()> {
        input.validate()?;
        let recipe = self.find_owned(author_id, recipe_id).await?;
        self.check_references(&input).await?;

        let mut tx = self.write_db.begin().await?;

        let statement = Query::update()
            .table(Recipe::Table)
            .values([
                (Recipe::Name, input.name.to_owned().into()),
                (Recipe::Image, input.image.to_owned().into()),
                (Recipe::Description, input.description.to_owned().into()),
                (Recipe::CookingTime, input.cooking_time.into()),
            ])
            .and_where(Expr::col(Recipe::Id).eq(&recipe.id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = Query::delete()
            .from_table(RecipeIngredient::Table)
            .and_where(Expr::col(RecipeIngredient::RecipeId).eq(&recipe.id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let statement = Query::delete()
            .from_table(RecipeTag::Table)
            .and_where(Expr::col(RecipeTag::RecipeId).eq(&recipe.id))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        Self::insert_links(&mut tx, &recipe.id, &input).await?;

        tx.commit().await?;

        Ok(())
    }
}
