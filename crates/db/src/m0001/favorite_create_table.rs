use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::{Favorite, Recipe, User};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Favorite::Table)
        .col(
            ColumnDef::new(Favorite::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(Favorite::RecipeId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(Favorite::CreatedAt).big_integer().not_null())
        .primary_key(Index::create().col(Favorite::UserId).col(Favorite::RecipeId))
        .foreign_key(
            ForeignKey::create()
                .from(Favorite::Table, Favorite::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(Favorite::Table, Favorite::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Favorite::Table).to_owned()
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
