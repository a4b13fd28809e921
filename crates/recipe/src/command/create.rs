use plateful_db::table::{Ingredient, Recipe, RecipeIngredient, RecipeTag, Tag};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use std::collections::HashSet;
use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

use crate::RecipeInput;

impl super::RecipeCommand {
    pub async fn create(
        &self,
        author_id: &str,
        input: RecipeInput,
    ) -> plateful_shared::Result<String> {
        input.validate()?;
        self.check_references(&input).await?;

        let id = Ulid::new().to_string();
        let now = OffsetDateTime::now_utc().unix_timestamp();

        let mut tx = self.write_db.begin().await?;

        let statement = Query::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::Id,
                Recipe::AuthorId,
                Recipe::Name,
                Recipe::Image,
                Recipe::Description,
                Recipe::CookingTime,
                Recipe::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                author_id.into(),
                input.name.to_owned().into(),
                input.image.to_owned().into(),
                input.description.to_owned().into(),
                input.cooking_time.into(),
                now.into(),
            ])
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        Self::insert_links(&mut tx, &id, &input).await?;

        tx.commit().await?;

        Ok(id)
    }

    /// Referenced tags and ingredients must exist, and no ingredient may be
    /// listed twice.
    pub(crate) async fn check_references(&self, input: &RecipeInput) -> plateful_shared::Result<()> {
        let mut seen = HashSet::new();
        for line in &input.ingredients {
            if !seen.insert(line.id.as_str()) {
                plateful_shared::invalid!("Ingredients must not repeat.");
            }
        }

        let ingredient_ids: Vec<String> =
            input.ingredients.iter().map(|l| l.id.to_owned()).collect();
        let statement = Query::select()
            .expr(Expr::col(Ingredient::Id).count())
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).is_in(ingredient_ids))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (found,): (i64,) = sqlx::query_as_with(&sql, values)
            .fetch_one(&self.read_db)
            .await?;
        if found as usize != input.ingredients.len() {
            plateful_shared::invalid!("Unknown ingredient id.");
        }

        if input.tags.is_empty() {
            return Ok(());
        }

        let tag_ids: HashSet<&String> = input.tags.iter().collect();
        if tag_ids.len() != input.tags.len() {
            plateful_shared::invalid!("Tags must not repeat.");
        }

        let statement = Query::select()
            .expr(Expr::col(Tag::Id).count())
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Id).is_in(input.tags.to_vec()))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (found,): (i64,) = sqlx::query_as_with(&sql, values)
            .fetch_one(&self.read_db)
            .await?;
        if found as usize != input.tags.len() {
            plateful_shared::invalid!("Unknown tag id.");
        }

        Ok(())
    }

    pub(crate) async fn insert_links(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        recipe_id: &str,
        input: &RecipeInput,
    ) -> plateful_shared::Result<()> {
        for line in &input.ingredients {
            let statement = Query::insert()
                .into_table(RecipeIngredient::Table)
                .columns([
                    RecipeIngredient::RecipeId,
                    RecipeIngredient::IngredientId,
                    RecipeIngredient::Amount,
                ])
                .values_panic([recipe_id.into(), line.id.to_owned().into(), line.amount.into()])
                .to_owned();
            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut **tx).await?;
        }

        for tag_id in &input.tags {
            let statement = Query::insert()
                .into_table(RecipeTag::Table)
                .columns([RecipeTag::RecipeId, RecipeTag::TagId])
                .values_panic([recipe_id.into(), tag_id.to_owned().into()])
                .to_owned();
            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut **tx).await?;
        }

        Ok(())
    }
}
