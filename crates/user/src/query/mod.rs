mod list;
mod subscriptions;

use sqlx::SqlitePool;

use crate::repository::{self, FindType, UserRow};

/// Read-side entry point over the read pool.
#[derive(Clone)]
pub struct UserQuery(pub SqlitePool);

impl UserQuery {
    pub async fn find(&self, id: &str) -> plateful_shared::Result<Option<UserRow>> {
        repository::find(&self.0, FindType::Id(id.to_owned())).await
    }
}
