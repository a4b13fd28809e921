use axum::{Json, extract::State, http::StatusCode};
use plateful_user::{Command, LoginInput, jwt};
use serde::Deserialize;
use serde_json::json;

use crate::{auth::AuthUser, error::AppError, server::AppState};

#[derive(Deserialize)]
pub struct TokenLoginBody {
    pub email: String,
    pub password: String,
}

pub async fn post_token_login(
    State(state): State<AppState>,
    Json(body): Json<TokenLoginBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let command = Command::new(state.read_db.clone(), state.write_db.clone());
    let user = command
        .login(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let token = jwt::generate_token(
        user.id,
        user.email,
        &state.config.jwt.secret,
        state.config.jwt.expiration_days,
    )?;

    Ok(Json(json!({ "auth_token": token })))
}

/// Tokens are stateless, so logout is a client-side discard. The endpoint
/// still requires a valid token, mirroring the original API.
pub async fn post_token_logout(_user: AuthUser) -> StatusCode {
    StatusCode::NO_CONTENT
}
