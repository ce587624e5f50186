use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::User;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(User::Table)
        .col(
            ColumnDef::new(User::Id)
                .integer()
                .not_null()
                .primary_key()
                .auto_increment(),
        )
        .col(
            ColumnDef::new(User::Email)
                .string()
                .not_null()
                .string_len(254)
                .unique_key(),
        )
        .col(
            ColumnDef::new(User::Username)
                .string()
                .not_null()
                .string_len(150)
                .unique_key(),
        )
        .col(
            ColumnDef::new(User::FirstName)
                .string()
                .not_null()
                .string_len(150)
                .default(""),
        )
        .col(
            ColumnDef::new(User::LastName)
                .string()
                .not_null()
                .string_len(150)
                .default(""),
        )
        .col(ColumnDef::new(User::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(User::Table).to_owned()
}

super::operation!(CreateTable, create_table(), drop_table());
