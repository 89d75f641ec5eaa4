//! Lowers backend-agnostic predicates into SQL expressions.

use model::core::value::Value;
use planner::{
    CompareOp, Predicate,
    query::{
        ast::expr::{BinaryOperator, Expr},
        column, value,
    },
};

pub fn predicate_expr(base_table: &str, predicate: &Predicate) -> Expr {
    match predicate {
        Predicate::Compare {
            column: col,
            op,
            value: val,
        } => Expr::binary(
            column(base_table, col),
            compare_operator(*op),
            value(val.clone()),
        ),
        Predicate::Like {
            column: col,
            pattern,
            case_insensitive,
        } => {
            let op = if *case_insensitive {
                BinaryOperator::ILike
            } else {
                BinaryOperator::Like
            };
            Expr::binary(
                column(base_table, col),
                op,
                value(Value::String(pattern.clone())),
            )
        }
        Predicate::In {
            column: col,
            values,
        } => Expr::InList {
            expr: Box::new(column(base_table, col)),
            list: values.iter().cloned().map(value).collect(),
        },
        Predicate::And(parts) => group(base_table, parts, BinaryOperator::And)
            .unwrap_or_else(always_true),
        Predicate::Or(parts) => {
            group(base_table, parts, BinaryOperator::Or).unwrap_or_else(always_false)
        }
    }
}

/// All predicates AND-combined, `None` when there are none.
pub fn where_expr(base_table: &str, predicates: &[Predicate]) -> Option<Expr> {
    group(base_table, predicates, BinaryOperator::And)
}

fn group(base_table: &str, parts: &[Predicate], op: BinaryOperator) -> Option<Expr> {
    Expr::fold(
        parts
            .iter()
            .map(|part| predicate_expr(base_table, part))
            .collect(),
        op,
    )
}

fn compare_operator(op: CompareOp) -> BinaryOperator {
    match op {
        CompareOp::Eq => BinaryOperator::Eq,
        CompareOp::Ne => BinaryOperator::NotEq,
        CompareOp::Gt => BinaryOperator::Gt,
        CompareOp::Gte => BinaryOperator::GtEq,
        CompareOp::Lt => BinaryOperator::Lt,
        CompareOp::Lte => BinaryOperator::LtEq,
    }
}

fn always_true() -> Expr {
    Expr::binary(
        value(Value::Int(1)),
        BinaryOperator::Eq,
        value(Value::Int(1)),
    )
}

// An empty IN list renders as a condition no row satisfies.
fn always_false() -> Expr {
    Expr::InList {
        expr: Box::new(value(Value::Int(1))),
        list: Vec::new(),
    }
}
