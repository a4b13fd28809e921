use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use plateful_user::{UserQuery, UserRow, jwt};

use crate::{error::AppError, server::AppState};

/// The authenticated caller, resolved from an `Authorization: Bearer <jwt>`
/// header. Rejects with 401 when the header is missing, the token does not
/// verify, or the user no longer exists.
pub struct AuthUser(pub UserRow);

/// Optional variant for endpoints that are readable anonymously but enrich
/// their responses for authenticated callers.
pub struct MaybeUser(pub Option<UserRow>);

async fn resolve_user(parts: &Parts, state: &AppState) -> Result<Option<UserRow>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let Some(token) = header.to_str().ok().and_then(|h| h.strip_prefix("Bearer ")) else {
        return Ok(None);
    };

    let Ok(claims) = jwt::validate_token(token, &state.config.jwt.secret) else {
        return Ok(None);
    };

    let user = UserQuery(state.read_db.clone())
        .find(&claims.sub)
        .await
        .map_err(AppError::Domain)?;

    Ok(user)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve_user(parts, state).await? {
            Some(user) => Ok(AuthUser(user)),
            None => Err(AppError::Unauthorized),
        }
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(resolve_user(parts, state).await?))
    }
}
