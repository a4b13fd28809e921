use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::{Recipe, RecipeTag, Tag};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(RecipeTag::Table)
        .col(
            ColumnDef::new(RecipeTag::RecipeId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(RecipeTag::TagId)
                .string()
                .not_null()
                .string_len(26),
        )
        .primary_key(Index::create().col(RecipeTag::RecipeId).col(RecipeTag::TagId))
        .foreign_key(
            ForeignKey::create()
                .from(RecipeTag::Table, RecipeTag::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(RecipeTag::Table, RecipeTag::TagId)
                .to(Tag::Table, Tag::Id),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(RecipeTag::Table).to_owned()
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
