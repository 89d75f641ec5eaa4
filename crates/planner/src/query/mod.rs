use crate::query::ast::expr::{Expr, Ident};
use model::{
    core::value::Value,
    pagination::column::{ColumnRef, TableAlias},
};

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod macros;
pub mod renderer;

pub fn value(val: Value) -> Expr {
    Expr::Value(val)
}

/// Qualified identifier for a column reference. `TableAlias::Current`
/// resolves to the base table name.
pub fn column(base_table: &str, col: &ColumnRef) -> Expr {
    let qualifier = match &col.table {
        TableAlias::Current => base_table.to_string(),
        TableAlias::Relation(alias) => alias.clone(),
    };
    Expr::Identifier(Ident {
        qualifier: Some(qualifier),
        name: col.column.clone(),
    })
}

