use plateful_db::table::{Ingredient, Tag};
use sea_query::{Expr, ExprTrait, LikeExpr, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::{IngredientRow, TagRow};

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

impl super::RecipeQuery {
    pub async fn list_tags(&self) -> plateful_shared::Result<Vec<TagRow>> {
        let statement = Query::select()
            .columns([Tag::Id, Tag::Name, Tag::Slug])
            .from(Tag::Table)
            .order_by(Tag::Name, sea_query::Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find_tag(&self, id: &str) -> plateful_shared::Result<Option<TagRow>> {
        let statement = Query::select()
            .columns([Tag::Id, Tag::Name, Tag::Slug])
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    /// Ingredient reference listing with optional name-prefix search, ordered
    /// by name. Unpaginated, matching the original API.
    pub async fn list_ingredients(
        &self,
        name_prefix: Option<&str>,
    ) -> plateful_shared::Result<Vec<IngredientRow>> {
        let mut statement = Query::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .order_by(Ingredient::Name, sea_query::Order::Asc)
            .to_owned();

        if let Some(prefix) = name_prefix
            && !prefix.is_empty()
        {
            statement.and_where(
                Expr::col(Ingredient::Name)
                    .like(LikeExpr::new(format!("{}%", escape_like(prefix))).escape('\\')),
            );
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find_ingredient(
        &self,
        id: &str,
    ) -> plateful_shared::Result<Option<IngredientRow>> {
        let statement = Query::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}
