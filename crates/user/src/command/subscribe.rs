use plateful_db::table::Subscription;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;

use crate::repository;

impl super::Command {
    pub async fn subscribe(&self, user_id: &str, author_id: &str) -> plateful_shared::Result<()> {
        if user_id == author_id {
            plateful_shared::invalid!("You cannot subscribe to yourself.");
        }

        if repository::find(
            &self.read_db,
            repository::FindType::Id(author_id.to_owned()),
        )
        .await?
        .is_none()
        {
            plateful_shared::not_found!("User not found.");
        }

        if self.is_subscribed(user_id, author_id).await? {
            plateful_shared::invalid!("Subscription already exists.");
        }

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(Subscription::Table)
            .columns([
                Subscription::UserId,
                Subscription::AuthorId,
                Subscription::CreatedAt,
            ])
            .values_panic([user_id.into(), author_id.into(), now.into()])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(())
    }

    pub async fn unsubscribe(&self, user_id: &str, author_id: &str) -> plateful_shared::Result<()> {
        let statement = Query::delete()
            .from_table(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user_id))
            .and_where(Expr::col(Subscription::AuthorId).eq(author_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            plateful_shared::invalid!("Subscription not found.");
        }

        Ok(())
    }

    async fn is_subscribed(&self, user_id: &str, author_id: &str) -> plateful_shared::Result<bool> {
        let statement = Query::select()
            .column(Subscription::UserId)
            .from(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user_id))
            .and_where(Expr::col(Subscription::AuthorId).eq(author_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.is_some())
    }
}
