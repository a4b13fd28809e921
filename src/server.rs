use axum::{
    Router,
    routing::{get, post, put},
};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::routes::{auth, ingredients, recipes, shopping, tags, users};

#[derive(Clone)]
pub struct AppState {
    pub read_db: SqlitePool,
    pub write_db: SqlitePool,
    pub config: Config,
}

/// Build the application router. Exposed separately from [`serve`] so tests
/// can drive it without binding a socket.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Token auth
        .route("/api/auth/token/login", post(auth::post_token_login))
        .route("/api/auth/token/logout", post(auth::post_token_logout))
        // Users
        .route("/api/users", get(users::get_users).post(users::post_users))
        .route("/api/users/me", get(users::get_me))
        .route(
            "/api/users/me/avatar",
            put(users::put_avatar).delete(users::delete_avatar),
        )
        .route("/api/users/set_password", post(users::post_set_password))
        .route("/api/users/subscriptions", get(users::get_subscriptions))
        .route("/api/users/{id}", get(users::get_user))
        .route(
            "/api/users/{id}/subscribe",
            post(users::post_subscribe).delete(users::delete_subscribe),
        )
        // Tags and ingredient reference data
        .route("/api/tags", get(tags::get_tags))
        .route("/api/tags/{id}", get(tags::get_tag))
        .route("/api/ingredients", get(ingredients::get_ingredients))
        .route("/api/ingredients/{id}", get(ingredients::get_ingredient))
        // Recipes
        .route(
            "/api/recipes",
            get(recipes::get_recipes).post(recipes::post_recipes),
        )
        .route(
            "/api/recipes/download_shopping_cart",
            get(shopping::download_shopping_cart),
        )
        .route(
            "/api/recipes/{id}",
            get(recipes::get_recipe)
                .patch(recipes::patch_recipe)
                .delete(recipes::delete_recipe),
        )
        .route("/api/recipes/{id}/get-link", get(recipes::get_link))
        .route(
            "/api/recipes/{id}/favorite",
            post(recipes::post_favorite).delete(recipes::delete_favorite),
        )
        .route(
            "/api/recipes/{id}/shopping_cart",
            post(recipes::post_shopping_cart).delete(recipes::delete_shopping_cart),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the web server
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> &'static str {
    "OK"
}
