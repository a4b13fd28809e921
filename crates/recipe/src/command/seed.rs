use plateful_db::table::{Ingredient, Tag};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use ulid::Ulid;

impl super::RecipeCommand {
    /// Get-or-create semantics for seeding reference data from a fixture
    /// file. Identity is (name, measurement_unit) for ingredients and slug
    /// for tags.
    pub async fn get_or_create_ingredient(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> plateful_shared::Result<String> {
        let statement = Query::select()
            .column(Ingredient::Id)
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Name).eq(name))
            .and_where(Expr::col(Ingredient::MeasurementUnit).eq(measurement_unit))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        if let Some((id,)) = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
        {
            return Ok(id);
        }

        let id = Ulid::new().to_string();
        let statement = Query::insert()
            .into_table(Ingredient::Table)
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .values_panic([id.to_owned().into(), name.into(), measurement_unit.into()])
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(id)
    }

    pub async fn get_or_create_tag(
        &self,
        name: &str,
        slug: &str,
    ) -> plateful_shared::Result<String> {
        let statement = Query::select()
            .column(Tag::Id)
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Slug).eq(slug))
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        if let Some((id,)) = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
        {
            return Ok(id);
        }

        let id = Ulid::new().to_string();
        let statement = Query::insert()
            .into_table(Tag::Table)
            .columns([Tag::Id, Tag::Name, Tag::Slug])
            .values_panic([id.to_owned().into(), name.into(), slug.into()])
            .to_owned();
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        Ok(id)
    }
}
