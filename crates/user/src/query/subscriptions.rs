use plateful_db::table::{Subscription, User};
use plateful_shared::PageArgs;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository::UserRow;

impl super::UserQuery {
    /// Authors the user follows, paginated, ordered by username.
    pub async fn subscriptions(
        &self,
        user_id: &str,
        args: &PageArgs,
    ) -> plateful_shared::Result<(u64, Vec<UserRow>)> {
        let count_statement = Query::select()
            .expr(Expr::col(Subscription::AuthorId).count())
            .from(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user_id))
            .to_owned();

        let (sql, values) = count_statement.build_sqlx(SqliteQueryBuilder);
        let (count,): (i64,) = sqlx::query_as_with(&sql, values).fetch_one(&self.0).await?;

        let statement = Query::select()
            .columns([
                (User::Table, User::Id),
                (User::Table, User::Email),
                (User::Table, User::Username),
                (User::Table, User::FirstName),
                (User::Table, User::LastName),
                (User::Table, User::Password),
                (User::Table, User::Role),
                (User::Table, User::Avatar),
            ])
            .from(User::Table)
            .join(
                sea_query::JoinType::InnerJoin,
                Subscription::Table,
                Expr::col((Subscription::Table, Subscription::AuthorId))
                    .equals((User::Table, User::Id)),
            )
            .and_where(Expr::col((Subscription::Table, Subscription::UserId)).eq(user_id))
            .order_by((User::Table, User::Username), sea_query::Order::Asc)
            .limit(args.limit())
            .offset(args.offset())
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok((count as u64, rows))
    }
}
