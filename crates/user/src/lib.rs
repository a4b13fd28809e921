mod command;
pub mod jwt;
mod query;
mod repository;
mod types;

pub use command::*;
pub use query::*;
pub use repository::{FindType, UserRow};
pub use types::*;
