use sea_query::Iden;

#[derive(Iden, Clone, Copy)]
pub enum User {
    Table,
    Id,
    Email,
    Username,
    FirstName,
    LastName,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Subscription {
    Table,
    Id,
    UserId,
    AuthorId,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Tag {
    Table,
    Id,
    Name,
    Color,
    Slug,
}

#[derive(Iden, Clone, Copy)]
pub enum Ingredient {
    Table,
    Id,
    Name,
    MeasurementUnit,
}

#[derive(Iden, Clone, Copy)]
pub enum Recipe {
    Table,
    Id,
    AuthorId,
    Name,
    Image,
    Text,
    CookingTime,
    PubDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum RecipeTag {
    Table,
    RecipeId,
    TagId,
}

#[derive(Iden, Clone, Copy)]
pub enum AmountIngredient {
    Table,
    Id,
    RecipeId,
    IngredientId,
    Amount,
}

#[derive(Iden, Clone, Copy)]
pub enum Favorite {
    Table,
    Id,
    UserId,
    RecipeId,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
pub enum Cart {
    Table,
    Id,
    UserId,
    RecipeId,
    CreatedAt,
}
