use sea_query::{
    ColumnDef, Expr, ExprTrait, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement,
    IndexDropStatement, Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{AmountIngredient, Ingredient, Recipe};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(AmountIngredient::Table)
        .col(
            ColumnDef::new(AmountIngredient::Id)
                .integer()
                .not_null()
                .primary_key()
                .auto_increment(),
        )
        .col(
            ColumnDef::new(AmountIngredient::RecipeId)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(AmountIngredient::IngredientId)
                .integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(AmountIngredient::Amount)
                .integer()
                .not_null()
                .check(Expr::col(AmountIngredient::Amount).gt(0)),
        )
        .foreign_key(
            ForeignKey::create()
                .from(AmountIngredient::Table, AmountIngredient::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .from(AmountIngredient::Table, AmountIngredient::IngredientId)
                .to(Ingredient::Table, Ingredient::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(AmountIngredient::Table).to_owned()
}

super::operation!(CreateTable, create_table(), drop_table());

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_amount_ingredient_recipe_ingredient")
        .table(AmountIngredient::Table)
        .col(AmountIngredient::RecipeId)
        .col(AmountIngredient::IngredientId)
        .unique()
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_amount_ingredient_recipe_ingredient")
        .table(AmountIngredient::Table)
        .to_owned()
}

super::operation!(CreateUk1, create_uk_1(), drop_uk_1());
