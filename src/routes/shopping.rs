use axum::{
    extract::State,
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use plateful_shopping::{Aggregator, SqliteCartStore};

use crate::{auth::AuthUser, error::AppError, server::AppState};

/// Aggregate the caller's whole shopping cart and serve it as a text-file
/// download.
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Response, AppError> {
    let aggregator = Aggregator::new(SqliteCartStore::new(state.read_db.clone()));
    let report = aggregator.generate_report(&user.id).await?;

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, report.content_type.to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename={}", report.filename),
            ),
        ],
        report.body,
    )
        .into_response())
}
