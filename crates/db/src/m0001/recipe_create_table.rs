use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Recipe, User};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Recipe::Table)
        .col(
            ColumnDef::new(Recipe::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Recipe::AuthorId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(Recipe::Name)
                .string()
                .not_null()
                .string_len(256),
        )
        .col(ColumnDef::new(Recipe::Image).text().not_null())
        .col(ColumnDef::new(Recipe::Description).text().not_null())
        .col(ColumnDef::new(Recipe::CookingTime).integer().not_null())
        .col(ColumnDef::new(Recipe::CreatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .from(Recipe::Table, Recipe::AuthorId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Recipe::Table).to_owned()
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
