use anyhow::Context;
use plateful_db::table::{CartEntry, Ingredient, RecipeIngredient};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;

use crate::{CartStore, IngredientInfo, IngredientLine};

/// [`CartStore`] over the relational schema. Holds the read pool only; the
/// aggregation never writes.
#[derive(Clone)]
pub struct SqliteCartStore {
    pool: SqlitePool,
}

impl SqliteCartStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CartStore for SqliteCartStore {
    async fn cart_recipe_ids(&self, user_id: &str) -> anyhow::Result<Vec<String>> {
        let statement = Query::select()
            .column(CartEntry::RecipeId)
            .from(CartEntry::Table)
            .and_where(Expr::col(CartEntry::UserId).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn ingredient_lines(&self, recipe_ids: &[String]) -> anyhow::Result<Vec<IngredientLine>> {
        if recipe_ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = Query::select()
            .columns([RecipeIngredient::IngredientId, RecipeIngredient::Amount])
            .from(RecipeIngredient::Table)
            .and_where(Expr::col(RecipeIngredient::RecipeId).is_in(recipe_ids.to_vec()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String, i64), _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|(ingredient_id, amount)| {
                let amount = u64::try_from(amount)
                    .with_context(|| format!("negative amount for ingredient {ingredient_id}"))?;
                Ok(IngredientLine {
                    ingredient_id,
                    amount,
                })
            })
            .collect()
    }

    async fn ingredient_info(&self, ingredient_id: &str) -> anyhow::Result<Option<IngredientInfo>> {
        let statement = Query::select()
            .columns([Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).eq(ingredient_id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String, String), _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|(name, measurement_unit)| IngredientInfo {
            name,
            measurement_unit,
        }))
    }
}
