use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Favorite, Recipe, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Favorite::Table)
        .col(
            ColumnDef::new(Favorite::Id)
                .integer()
                .not_null()
                .primary_key()
                .auto_increment(),
        )
        .col(ColumnDef::new(Favorite::UserId).integer().not_null())
        .col(ColumnDef::new(Favorite::RecipeId).integer().not_null())
        .col(ColumnDef::new(Favorite::CreatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .from(Favorite::Table, Favorite::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(Favorite::Table, Favorite::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Favorite::Table).to_owned()
}

super::operation!(CreateTable, create_table(), drop_table());

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_favorite_user_recipe")
        .table(Favorite::Table)
        .col(Favorite::UserId)
        .col(Favorite::RecipeId)
        .unique()
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_favorite_user_recipe")
        .table(Favorite::Table)
        .to_owned()
}

super::operation!(CreateUk1, create_uk_1(), drop_uk_1());
