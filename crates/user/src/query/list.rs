use plateful_db::table::{Subscription, User};
use plateful_shared::PageArgs;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository::UserRow;

impl super::UserQuery {
    /// Paginated user listing, ordered by username.
    pub async fn list(&self, args: &PageArgs) -> plateful_shared::Result<(u64, Vec<UserRow>)> {
        let count_statement = Query::select()
            .expr(Expr::col(User::Id).count())
            .from(User::Table)
            .to_owned();

        let (sql, values) = count_statement.build_sqlx(SqliteQueryBuilder);
        let (count,): (i64,) = sqlx::query_as_with(&sql, values).fetch_one(&self.0).await?;

        let statement = Query::select()
            .columns([
                User::Id,
                User::Email,
                User::Username,
                User::FirstName,
                User::LastName,
                User::Password,
                User::Role,
                User::Avatar,
            ])
            .from(User::Table)
            .order_by(User::Username, sea_query::Order::Asc)
            .limit(args.limit())
            .offset(args.offset())
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok((count as u64, rows))
    }

    /// Batch lookup, used when assembling pages that embed their authors.
    pub async fn find_many(&self, ids: &[String]) -> plateful_shared::Result<Vec<UserRow>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = Query::select()
            .columns([
                User::Id,
                User::Email,
                User::Username,
                User::FirstName,
                User::LastName,
                User::Password,
                User::Role,
                User::Avatar,
            ])
            .from(User::Table)
            .and_where(Expr::col(User::Id).is_in(ids.to_vec()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn is_subscribed(
        &self,
        user_id: &str,
        author_id: &str,
    ) -> plateful_shared::Result<bool> {
        let statement = Query::select()
            .column(Subscription::AuthorId)
            .from(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user_id))
            .and_where(Expr::col(Subscription::AuthorId).eq(author_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        Ok(row.is_some())
    }

    /// Which of the given authors does the user follow. One query for a whole
    /// page of results.
    pub async fn subscribed_ids(
        &self,
        user_id: &str,
        author_ids: &[String],
    ) -> plateful_shared::Result<Vec<String>> {
        if author_ids.is_empty() {
            return Ok(vec![]);
        }

        let statement = Query::select()
            .column(Subscription::AuthorId)
            .from(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user_id))
            .and_where(Expr::col(Subscription::AuthorId).is_in(author_ids.to_vec()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
