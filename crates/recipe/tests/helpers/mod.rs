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

pub fn recipe_command(pool: &SqlitePool) -> plateful_recipe::RecipeCommand {
    plateful_recipe::RecipeCommand::new(pool.clone(), pool.clone())
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

#[allow(dead_code)]
pub struct Fixtures {
    pub author: String,
    pub breakfast_tag: String,
    pub salt: String,
    pub sugar: String,
}

#[allow(dead_code)]
pub async fn seed(pool: &SqlitePool) -> anyhow::Result<Fixtures> {
    let cmd = recipe_command(pool);
    let author = create_user(pool, "author").await?;
    let breakfast_tag = cmd.get_or_create_tag("Breakfast", "breakfast").await?;
    let salt = cmd.get_or_create_ingredient("Salt", "g").await?;
    let sugar = cmd.get_or_create_ingredient("Sugar", "g").await?;

    Ok(Fixtures {
        author,
        breakfast_tag,
        salt,
        sugar,
    })
}

#[allow(dead_code)]
pub fn recipe_input(
    name: &str,
    ingredients: Vec<(String, u32)>,
    tags: Vec<String>,
) -> plateful_recipe::RecipeInput {
    plateful_recipe::RecipeInput {
        name: name.to_owned(),
        image: "data:image/png;base64,aGVsbG8=".to_owned(),
        description: format!("How to cook {name}"),
        ingredients: ingredients
            .into_iter()
            .map(|(id, amount)| plateful_recipe::IngredientLineInput { id, amount })
            .collect(),
        tags,
        cooking_time: 30,
    }
}
