use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Tag;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Tag::Table)
        .col(
            ColumnDef::new(Tag::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Tag::Name)
                .string()
                .not_null()
                .string_len(256),
        )
        .col(
            ColumnDef::new(Tag::Slug)
                .string()
                .not_null()
                .string_len(64),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Tag::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
