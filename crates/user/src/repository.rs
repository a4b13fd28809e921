use plateful_db::table::User;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: String,
    pub avatar: Option<String>,
}

pub enum FindType {
    Id(String),
    Email(String),
    Username(String),
}

pub(crate) async fn find(
    pool: &SqlitePool,
    arg_type: FindType,
) -> plateful_shared::Result<Option<UserRow>> {
    let mut statement = Query::select()
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
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::col(User::Email).eq(email)),
        FindType::Username(username) => {
            statement.and_where(Expr::col(User::Username).eq(username))
        }
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) struct CreateInput {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub(crate) async fn create(pool: &SqlitePool, input: CreateInput) -> plateful_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Id,
            User::Email,
            User::Username,
            User::FirstName,
            User::LastName,
            User::Password,
            User::Role,
            User::CreatedAt,
        ])
        .values_panic([
            input.id.into(),
            input.email.into(),
            input.username.into(),
            input.first_name.into(),
            input.last_name.into(),
            input.password.into(),
            crate::Role::User.to_string().into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) struct UpdateInput {
    pub id: String,
    pub password: Option<String>,
    pub avatar: Option<Option<String>>,
}

pub(crate) async fn update(pool: &SqlitePool, input: UpdateInput) -> plateful_shared::Result<()> {
    let mut statement = Query::update()
        .table(User::Table)
        .and_where(Expr::col(User::Id).eq(input.id))
        .to_owned();

    if let Some(password) = input.password {
        statement.value(User::Password, password);
    }

    if let Some(avatar) = input.avatar {
        match avatar {
            Some(avatar) => statement.value(User::Avatar, avatar),
            None => statement.value(User::Avatar, sea_query::Value::String(None)),
        };
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}
