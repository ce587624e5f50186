use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Cart, Recipe, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Cart::Table)
        .col(
            ColumnDef::new(Cart::Id)
                .integer()
                .not_null()
                .primary_key()
                .auto_increment(),
        )
        .col(ColumnDef::new(Cart::UserId).integer().not_null())
        .col(ColumnDef::new(Cart::RecipeId).integer().not_null())
        .col(ColumnDef::new(Cart::CreatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .from(Cart::Table, Cart::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(Cart::Table, Cart::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Cart::Table).to_owned()
}

super::operation!(CreateTable, create_table(), drop_table());

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_cart_user_recipe")
        .table(Cart::Table)
        .col(Cart::UserId)
        .col(Cart::RecipeId)
        .unique()
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_cart_user_recipe")
        .table(Cart::Table)
        .to_owned()
}

super::operation!(CreateUk1, create_uk_1(), drop_uk_1());
