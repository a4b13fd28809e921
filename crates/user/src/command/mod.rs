mod avatar;
mod login;
mod register;
mod set_password;
mod subscribe;

pub use avatar::*;
pub use login::*;
pub use register::*;
pub use set_password::*;
pub use subscribe::*;

use sqlx::SqlitePool;

/// Write-side entry point. Reads go through the read pool, mutations through
/// the single-connection write pool.
#[derive(Clone)]
pub struct Command {
    pub read_db: SqlitePool,
    pub write_db: SqlitePool,
}

impl Command {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self { read_db, write_db }
    }
}
