use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Email,
    Username,
    FirstName,
    LastName,
    Password,
    Role,
    Avatar,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Subscription {
    Table,
    UserId,
    AuthorId,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Tag {
    Table,
    Id,
    Name,
    Slug,
}

#[derive(Iden, Clone)]
pub enum Ingredient {
    Table,
    Id,
    Name,
    MeasurementUnit,
}

#[derive(Iden, Clone)]
pub enum Recipe {
    Table,
    Id,
    AuthorId,
    Name,
    Image,
    Description,
    CookingTime,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum RecipeIngredient {
    Table,
    RecipeId,
    IngredientId,
    Amount,
}

#[derive(Iden, Clone)]
pub enum RecipeTag {
    Table,
    RecipeId,
    TagId,
}

#[derive(Iden, Clone)]
pub enum Favorite {
    Table,
    UserId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum CartEntry {
    Table,
    UserId,
    RecipeId,
    CreatedAt,
}
