use std::{path::PathBuf, str::FromStr};

use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_pool(path: PathBuf) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;

    let mut conn = pool.acquire().await?;
    plateful_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(pool)
}

pub fn command(pool: &SqlitePool) -> plateful_user::Command {
    plateful_user::Command::new(pool.clone(), pool.clone())
}

#[allow(dead_code)]
pub async fn register_user(
    cmd: &plateful_user::Command,
    name: impl Into<String>,
) -> anyhow::Result<String> {
    let name = name.into();
    let id = cmd
        .register(plateful_user::RegisterInput {
            email: format!("{name}@plateful.localhost"),
            username: name.to_owned(),
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?;

    Ok(id)
}
