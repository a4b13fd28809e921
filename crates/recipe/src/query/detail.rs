use plateful_db::table::{CartEntry, Favorite, Ingredient, RecipeIngredient, RecipeTag, Tag};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::{RecipeIngredientRow, RecipeTagRow};

impl super::RecipeQuery {
    /// Tag links for a batch of recipes, one query per page.
    pub async fn tags_for(
        &self,
        recipe_ids: &[String],
    ) -> plateful_shared::Result<Vec<RecipeTagRow>> {
        if recipe_ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = Query::select()
            .column((RecipeTag::Table, RecipeTag::RecipeId))
            .columns([
                (Tag::Table, Tag::Id),
                (Tag::Table, Tag::Name),
                (Tag::Table, Tag::Slug),
            ])
            .from(RecipeTag::Table)
            .join(
                sea_query::JoinType::InnerJoin,
                Tag::Table,
                Expr::col((RecipeTag::Table, RecipeTag::TagId)).equals((Tag::Table, Tag::Id)),
            )
            .and_where(
                Expr::col((RecipeTag::Table, RecipeTag::RecipeId)).is_in(recipe_ids.to_vec()),
            )
            .order_by((Tag::Table, Tag::Name), sea_query::Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeTagRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    /// Ingredient lines joined with current reference data, for a batch of
    /// recipes.
    pub async fn ingredient_lines_for(
        &self,
        recipe_ids: &[String],
    ) -> plateful_shared::Result<Vec<RecipeIngredientRow>> {
        if recipe_ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = Query::select()
            .columns([
                (RecipeIngredient::Table, RecipeIngredient::RecipeId),
                (RecipeIngredient::Table, RecipeIngredient::IngredientId),
            ])
            .columns([
                (Ingredient::Table, Ingredient::Name),
                (Ingredient::Table, Ingredient::MeasurementUnit),
            ])
            .column((RecipeIngredient::Table, RecipeIngredient::Amount))
            .from(RecipeIngredient::Table)
            .join(
                sea_query::JoinType::InnerJoin,
                Ingredient::Table,
                Expr::col((RecipeIngredient::Table, RecipeIngredient::IngredientId))
                    .equals((Ingredient::Table, Ingredient::Id)),
            )
            .and_where(
                Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId))
                    .is_in(recipe_ids.to_vec()),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(
            sqlx::query_as_with::<_, RecipeIngredientRow, _>(&sql, values)
                .fetch_all(&self.0)
                .await?,
        )
    }

    /// Which of the given recipes the user has favorited.
    pub async fn favorited_ids(
        &self,
        user_id: &str,
        recipe_ids: &[String],
    ) -> plateful_shared::Result<Vec<String>> {
        if recipe_ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = Query::select()
            .column(Favorite::RecipeId)
            .from(Favorite::Table)
            .and_where(Expr::col(Favorite::UserId).eq(user_id))
            .and_where(Expr::col(Favorite::RecipeId).is_in(recipe_ids.to_vec()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Which of the given recipes sit in the user's shopping cart.
    pub async fn in_cart_ids(
        &self,
        user_id: &str,
        recipe_ids: &[String],
    ) -> plateful_shared::Result<Vec<String>> {
        if recipe_ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = Query::select()
            .column(CartEntry::RecipeId)
            .from(CartEntry::Table)
            .and_where(Expr::col(CartEntry::UserId).eq(user_id))
            .and_where(Expr::col(CartEntry::RecipeId).is_in(recipe_ids.to_vec()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
