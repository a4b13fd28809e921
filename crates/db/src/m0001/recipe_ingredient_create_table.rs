use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::{Ingredient, Recipe, RecipeIngredient};

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(RecipeIngredient::Table)
        .col(
            ColumnDef::new(RecipeIngredient::RecipeId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(RecipeIngredient::IngredientId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(RecipeIngredient::Amount)
                .big_integer()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(RecipeIngredient::RecipeId)
                .col(RecipeIngredient::IngredientId),
        )
        .foreign_key(
            ForeignKey::create()
                .from(RecipeIngredient::Table, RecipeIngredient::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(RecipeIngredient::Table, RecipeIngredient::IngredientId)
                .to(Ingredient::Table, Ingredient::Id),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(RecipeIngredient::Table).to_owned()
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
