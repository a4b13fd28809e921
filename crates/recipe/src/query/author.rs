use plateful_db::table::Recipe;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::RecipeRow;

impl super::RecipeQuery {
    /// An author's recipes, newest first, optionally trimmed for the
    /// subscriptions listing.
    pub async fn by_author(
        &self,
        author_id: &str,
        limit: Option<u64>,
    ) -> plateful_shared::Result<Vec<RecipeRow>> {
        let mut statement = Query::select()
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
            .and_where(Expr::col(Recipe::AuthorId).eq(author_id))
            .order_by(Recipe::CreatedAt, sea_query::Order::Desc)
            .order_by(Recipe::Id, sea_query::Order::Desc)
            .to_owned();

        if let Some(limit) = limit {
            statement.limit(limit);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn count_by_author(&self, author_id: &str) -> plateful_shared::Result<u64> {
        let statement = Query::select()
            .expr(Expr::col(Recipe::Id).count())
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(author_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (count,): (i64,) = sqlx::query_as_with(&sql, values).fetch_one(&self.0).await?;

        Ok(count as u64)
    }
}
