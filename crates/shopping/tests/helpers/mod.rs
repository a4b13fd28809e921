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

pub async fn create_user(pool: &SqlitePool, name: impl Into<String>) -> anyhow::Result<String> {
    let name = name.into();
    let cmd = plateful_user::Command::new(pool.clone(), pool.clone());
    let id = cmd
        .register(plateful_user::RegisterInput {
            email: format!("{name}@plateful.localhost"),
            username: name,
            first_name: "John".to_owned(),
            last_name: "Doe".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?;

    Ok(id)
}

pub async fn create_recipe(
    pool: &SqlitePool,
    author_id: &str,
    name: &str,
    ingredients: Vec<(String, u32)>,
) -> anyhow::Result<String> {
    let cmd = plateful_recipe::RecipeCommand::new(pool.clone(), pool.clone());
    let id = cmd
        .create(
            author_id,
            plateful_recipe::RecipeInput {
                name: name.to_owned(),
                image: "data:image/png;base64,aGVsbG8=".to_owned(),
                description: format!("How to cook {name}"),
                ingredients: ingredients
                    .into_iter()
                    .map(|(id, amount)| plateful_recipe::IngredientLineInput { id, amount })
                    .collect(),
                tags: vec![],
                cooking_time: 20,
            },
        )
        .await?;

    Ok(id)
}
