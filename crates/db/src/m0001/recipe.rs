use sea_query::{
    ColumnDef, Expr, ExprTrait, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement,
    IndexDropStatement, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Recipe, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Recipe::Table)
        .col(
            ColumnDef::new(Recipe::Id)
                .integer()
                .not_null()
                .primary_key()
                .auto_increment(),
        )
        .col(ColumnDef::new(Recipe::AuthorId).integer().not_null())
        .col(
            ColumnDef::new(Recipe::Name)
                .string()
                .not_null()
                .string_len(200)
                .unique_key(),
        )
        .col(
            ColumnDef::new(Recipe::Image)
                .string()
                .not_null()
                .string_len(200),
        )
        .col(ColumnDef::new(Recipe::Text).text().not_null())
        .col(
            ColumnDef::new(Recipe::CookingTime)
                .integer()
                .not_null()
                .check(Expr::col(Recipe::CookingTime).gt(0)),
        )
        .col(ColumnDef::new(Recipe::PubDate).big_integer().not_null())
        .col(ColumnDef::new(Recipe::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Recipe::UpdatedAt).big_integer().null())
        .foreign_key(
            ForeignKey::create()
                .from(Recipe::Table, Recipe::AuthorId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Recipe::Table).to_owned()
}

super::operation!(CreateTable, create_table(), drop_table());

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_author")
        .table(Recipe::Table)
        .col(Recipe::AuthorId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_author")
        .table(Recipe::Table)
        .to_owned()
}

super::operation!(CreateIdx1, create_idx_1(), drop_idx_1());

fn create_idx_2() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_pub_date")
        .table(Recipe::Table)
        .col(Recipe::PubDate)
        .col(Recipe::Id)
        .to_owned()
}

fn drop_idx_2() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_pub_date")
        .table(Recipe::Table)
        .to_owned()
}

super::operation!(CreateIdx2, create_idx_2(), drop_idx_2());
