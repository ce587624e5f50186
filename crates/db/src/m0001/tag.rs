use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Tag;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Tag::Table)
        .col(
            ColumnDef::new(Tag::Id)
                .integer()
                .not_null()
                .primary_key()
                .auto_increment(),
        )
        .col(
            ColumnDef::new(Tag::Name)
                .string()
                .not_null()
                .string_len(200)
                .unique_key(),
        )
        .col(
            ColumnDef::new(Tag::Color)
                .string()
                .not_null()
                .string_len(6)
                .unique_key(),
        )
        .col(
            ColumnDef::new(Tag::Slug)
                .string()
                .not_null()
                .string_len(200)
                .unique_key(),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Tag::Table).to_owned()
}

super::operation!(CreateTable, create_table(), drop_table());
