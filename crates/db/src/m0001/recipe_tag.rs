use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Recipe, RecipeTag, Tag};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(RecipeTag::Table)
        .col(ColumnDef::new(RecipeTag::RecipeId).integer().not_null())
        .col(ColumnDef::new(RecipeTag::TagId).integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .from(RecipeTag::Table, RecipeTag::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(RecipeTag::Table, RecipeTag::TagId)
                .to(Tag::Table, Tag::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(RecipeTag::Table).to_owned()
}

super::operation!(CreateTable, create_table(), drop_table());

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_recipe_tag")
        .table(RecipeTag::Table)
        .col(RecipeTag::RecipeId)
        .col(RecipeTag::TagId)
        .unique()
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_recipe_tag")
        .table(RecipeTag::Table)
        .to_owned()
}

super::operation!(CreateUk1, create_uk_1(), drop_uk_1());

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_tag_tag")
        .table(RecipeTag::Table)
        .col(RecipeTag::TagId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_tag_tag")
        .table(RecipeTag::Table)
        .to_owned()
}

super::operation!(CreateIdx1, create_idx_1(), drop_idx_1());
