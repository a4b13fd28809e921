use plateful_db::table::{CartEntry, Favorite, Recipe, RecipeTag, Tag};
use plateful_shared::PageArgs;
use sea_query::{Expr, ExprTrait, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::RecipeRow;

#[derive(Debug, Default, Clone)]
pub struct RecipesFilter {
    pub author: Option<String>,
    /// Tag slugs, matched as OR.
    pub tags: Vec<String>,
    pub favorited_by: Option<String>,
    pub in_cart_of: Option<String>,
}

fn apply_filter(statement: &mut SelectStatement, filter: &RecipesFilter) {
    if let Some(author) = &filter.author {
        statement.and_where(Expr::col((Recipe::Table, Recipe::AuthorId)).eq(author));
    }

    if !filter.tags.is_empty() {
        let tagged = Query::select()
            .column((RecipeTag::Table, RecipeTag::RecipeId))
            .from(RecipeTag::Table)
            .join(
                sea_query::JoinType::InnerJoin,
                Tag::Table,
                Expr::col((RecipeTag::Table, RecipeTag::TagId)).equals((Tag::Table, Tag::Id)),
            )
            .and_where(Expr::col((Tag::Table, Tag::Slug)).is_in(filter.tags.to_vec()))
            .to_owned();
        statement.and_where(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(tagged));
    }

    if let Some(user_id) = &filter.favorited_by {
        let favorited = Query::select()
            .column(Favorite::RecipeId)
            .from(Favorite::Table)
            .and_where(Expr::col(Favorite::UserId).eq(user_id))
            .to_owned();
        statement.and_where(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(favorited));
    }

    if let Some(user_id) = &filter.in_cart_of {
        let in_cart = Query::select()
            .column(CartEntry::RecipeId)
            .from(CartEntry::Table)
            .and_where(Expr::col(CartEntry::UserId).eq(user_id))
            .to_owned();
        statement.and_where(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(in_cart));
    }
}

impl super::RecipeQuery {
    /// Paginated recipe listing, newest first.
    pub async fn list(
        &self,
        filter: &RecipesFilter,
        args: &PageArgs,
    ) -> plateful_shared::Result<(u64, Vec<RecipeRow>)> {
        let mut count_statement = Query::select()
            .expr(Expr::col((Recipe::Table, Recipe::Id)).count())
            .from(Recipe::Table)
            .to_owned();
        apply_filter(&mut count_statement, filter);

        let (sql, values) = count_statement.build_sqlx(SqliteQueryBuilder);
        let (count,): (i64,) = sqlx::query_as_with(&sql, values).fetch_one(&self.0).await?;

        let mut statement = Query::select()
            .columns([
                (Recipe::Table, Recipe::Id),
                (Recipe::Table, Recipe::AuthorId),
                (Recipe::Table, Recipe::Name),
                (Recipe::Table, Recipe::Image),
                (Recipe::Table, Recipe::Description),
                (Recipe::Table, Recipe::CookingTime),
                (Recipe::Table, Recipe::CreatedAt),
            ])
            .from(Recipe::Table)
            .order_by((Recipe::Table, Recipe::CreatedAt), sea_query::Order::Desc)
            .order_by((Recipe::Table, Recipe::Id), sea_query::Order::Desc)
            .limit(args.limit())
            .offset(args.offset())
            .to_owned();
        apply_filter(&mut statement, filter);

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok((count as u64, rows))
    }
}
