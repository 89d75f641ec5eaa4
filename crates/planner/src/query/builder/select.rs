//! Typestate builder for the count and page `Select` ASTs.
//!
//! A builder starts [`Open`]: joins, conditions and ordering can be added in
//! any order. [`SelectBuilder::page`] moves it to [`Paged`], after which only
//! [`SelectBuilder::build`] is available, so a window is always the last
//! clause applied.

use crate::query::ast::{
    common::{JoinKind, OrderDir, TableRef},
    expr::{BinaryOperator, Expr},
    select::{FromClause, JoinClause, OrderByExpr, Select},
};
use std::marker::PhantomData;

/// Clauses can still be added.
#[derive(Debug, Clone, Copy)]
pub struct Open;

/// `LIMIT`/`OFFSET` have been set.
#[derive(Debug, Clone, Copy)]
pub struct Paged;

#[derive(Debug, Clone)]
pub struct SelectBuilder<State> {
    ast: Select,
    _state: PhantomData<State>,
}

impl SelectBuilder<Open> {
    /// `SELECT <columns> FROM <table>`.
    pub fn new(table: TableRef, columns: Vec<Expr>) -> Self {
        Self {
            ast: Select {
                columns,
                from: Some(FromClause { table }),
                ..Default::default()
            },
            _state: PhantomData,
        }
    }

    /// `SELECT COUNT(*) FROM <table>`.
    pub fn count(table: TableRef) -> Self {
        Self::new(table, vec![Expr::count_all()])
    }

    /// `SELECT "<table>".* FROM <table>`, so joined columns never leak into
    /// the result.
    pub fn rows(table: TableRef) -> Self {
        let wildcard = Expr::Wildcard {
            qualifier: Some(table.name.clone()),
        };
        Self::new(table, vec![wildcard])
    }

    pub fn join(mut self, kind: JoinKind, table: TableRef, alias: &str, on: Expr) -> Self {
        self.ast.joins.push(JoinClause {
            kind,
            table,
            alias: alias.to_string(),
            on,
        });
        self
    }

    /// ANDs `condition` with the current `WHERE`, if any.
    pub fn and_where(mut self, condition: Expr) -> Self {
        self.ast.where_clause = match self.ast.where_clause.take() {
            Some(existing) => Some(Expr::binary(existing, BinaryOperator::And, condition)),
            None => Some(condition),
        };
        self
    }

    pub fn order_by(mut self, expr: Expr, direction: OrderDir) -> Self {
        self.ast.order_by.push(OrderByExpr {
            expr,
            direction: Some(direction),
        });
        self
    }

    pub fn page(mut self, limit: Expr, offset: Expr) -> SelectBuilder<Paged> {
        self.ast.limit = Some(limit);
        self.ast.offset = Some(offset);
        SelectBuilder {
            ast: self.ast,
            _state: PhantomData,
        }
    }
}

impl<State> SelectBuilder<State> {
    pub fn build(self) -> Select {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ast::expr::Ident;
    use model::core::value::Value;

    fn qual_ident(qualifier: &str, name: &str) -> Expr {
        Expr::Identifier(Ident {
            qualifier: Some(qualifier.to_string()),
            name: name.to_string(),
        })
    }

    fn table(name: &str) -> TableRef {
        TableRef {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_count_select() {
        let ast = SelectBuilder::count(table("posts")).build();

        assert_eq!(ast.columns, vec![Expr::count_all()]);
        assert_eq!(ast.from.unwrap().table.name, "posts");
        assert!(ast.where_clause.is_none());
        assert!(ast.limit.is_none());
    }

    #[test]
    fn test_rows_select_qualifies_wildcard() {
        let ast = SelectBuilder::rows(table("posts")).build();
        assert_eq!(
            ast.columns,
            vec![Expr::Wildcard {
                qualifier: Some("posts".into())
            }]
        );
    }

    #[test]
    fn test_and_where_combines_conditions() {
        let first = Expr::binary(
            qual_ident("posts", "status"),
            BinaryOperator::Eq,
            Expr::Value(Value::from("published")),
        );
        let second = Expr::binary(
            qual_ident("posts", "id"),
            BinaryOperator::Gt,
            Expr::Value(Value::Int(18)),
        );

        let ast = SelectBuilder::count(table("posts"))
            .and_where(first.clone())
            .and_where(second.clone())
            .build();

        assert_eq!(
            ast.where_clause,
            Some(Expr::binary(first, BinaryOperator::And, second))
        );
    }

    #[test]
    fn test_page_with_join_and_ordering() {
        let ast = SelectBuilder::rows(table("posts"))
            .join(
                JoinKind::Left,
                table("users"),
                "User",
                Expr::binary(
                    qual_ident("posts", "user_id"),
                    BinaryOperator::Eq,
                    qual_ident("User", "id"),
                ),
            )
            .order_by(qual_ident("posts", "id"), OrderDir::Desc)
            .page(Expr::Value(Value::Uint(10)), Expr::Value(Value::Uint(20)))
            .build();

        assert_eq!(ast.joins.len(), 1);
        assert_eq!(ast.joins[0].alias, "User");
        assert_eq!(ast.order_by[0].direction, Some(OrderDir::Desc));
        assert_eq!(ast.limit, Some(Expr::Value(Value::Uint(10))));
        assert_eq!(ast.offset, Some(Expr::Value(Value::Uint(20))));
    }

    #[test]
    fn test_fold_empty_is_none() {
        let a = qual_ident("posts", "a");
        assert_eq!(Expr::fold(Vec::new(), BinaryOperator::Or), None);
        assert_eq!(Expr::fold(vec![a.clone()], BinaryOperator::Or), Some(a));
    }
}
