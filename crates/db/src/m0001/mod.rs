mod cart_entry_create_table;
mod favorite_create_table;
mod ingredient_create_name_idx;
mod ingredient_create_table;
mod recipe_create_author_idx;
mod recipe_create_table;
mod recipe_ingredient_create_table;
mod recipe_tag_create_table;
mod subscription_create_table;
mod tag_create_slug_idx;
mod tag_create_table;
mod user_create_email_idx;
mod user_create_table;
mod user_create_username_idx;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "main",
    "m0001",
    vec_box![],
    vec_box![
        user_create_table::CreateTable,
        user_create_email_idx::Operation,
        user_create_username_idx::Operation,
        subscription_create_table::CreateTable,
        tag_create_table::CreateTable,
        tag_create_slug_idx::Operation,
        ingredient_create_table::CreateTable,
        ingredient_create_name_idx::Operation,
        recipe_create_table::CreateTable,
        recipe_create_author_idx::Operation,
        recipe_ingredient_create_table::CreateTable,
        recipe_tag_create_table::CreateTable,
        favorite_create_table::CreateTable,
        cart_entry_create_table::CreateTable
    ]
);
