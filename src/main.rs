use anyhow::Result;
use clap::{Parser, Subcommand};
use plateful::config::Config;
use serde::Deserialize;
use sqlx::migrate::MigrateDatabase;
use sqlx_migrator::{Migrate, Plan};

/// plateful - recipe sharing backend
#[derive(Parser)]
#[command(name = "plateful")]
#[command(about = "Recipe sharing and shopping list backend", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Load tag and ingredient reference data from a JSON file
    Seed {
        /// Path to the seed file
        #[arg(long, default_value = "data/seed.json")]
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    plateful::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Migrate => migrate_command(config).await,
        Commands::Reset => reset_command(config).await,
        Commands::Seed { path } => seed_command(config, path).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    mut config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting plateful server...");

    if let Some(host) = host_override {
        config.server.host = host;
    }
    if let Some(port) = port_override {
        config.server.port = port;
    }

    let read_db =
        plateful::db::create_read_pool(&config.database.url, config.database.max_connections)
            .await?;
    let write_db = plateful::db::create_write_pool(&config.database.url).await?;

    let state = plateful::AppState {
        read_db,
        write_db,
        config,
    };

    plateful::server::serve(state).await
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!("Database does not exist, creating: {}", config.database.url);
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = plateful::db::create_pool(&config.database.url, 1).await?;

    let mut conn = pool.acquire().await?;
    plateful_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn reset_command(config: Config) -> Result<()> {
    tracing::info!("Resetting database...");

    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!("Dropping existing database: {}", config.database.url);
        sqlx::Sqlite::drop_database(&config.database.url).await?;
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    migrate_command(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}

#[derive(Deserialize)]
struct SeedIngredient {
    name: String,
    measurement_unit: String,
}

#[derive(Deserialize)]
struct SeedTag {
    name: String,
    slug: String,
}

#[derive(Deserialize)]
struct SeedData {
    #[serde(default)]
    ingredients: Vec<SeedIngredient>,
    #[serde(default)]
    tags: Vec<SeedTag>,
}

/// Load reference data with get-or-create semantics, so re-running the seed
/// is harmless.
#[tracing::instrument(skip(config))]
async fn seed_command(config: Config, path: String) -> Result<()> {
    let raw = std::fs::read_to_string(&path)?;
    let data: SeedData = serde_json::from_str(&raw)?;

    let pool = plateful::db::create_pool(&config.database.url, 1).await?;
    let command = plateful_recipe::RecipeCommand::new(pool.clone(), pool.clone());

    for ingredient in &data.ingredients {
        command
            .get_or_create_ingredient(&ingredient.name, &ingredient.measurement_unit)
            .await?;
    }
    for tag in &data.tags {
        command.get_or_create_tag(&tag.name, &tag.slug).await?;
    }

    tracing::info!(
        "Seeded {} ingredients and {} tags from {}",
        data.ingredients.len(),
        data.tags.len(),
        path
    );

    Ok(())
}
