pub mod auth;
pub mod bodies;
pub mod ingredients;
pub mod recipes;
pub mod shopping;
pub mod tags;
pub mod users;
