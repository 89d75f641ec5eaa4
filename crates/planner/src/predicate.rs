//! Backend-agnostic WHERE conditions.

use model::{
    core::value::Value,
    pagination::column::{ColumnRef, TableAlias},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "<>",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    Compare {
        column: ColumnRef,
        op: CompareOp,
        value: Value,
    },
    Like {
        column: ColumnRef,
        pattern: String,
        case_insensitive: bool,
    },
    In {
        column: ColumnRef,
        values: Vec<Value>,
    },
    Or(Vec<Predicate>),
    And(Vec<Predicate>),
}

impl Predicate {
    pub fn compare(column: ColumnRef, op: CompareOp, value: Value) -> Self {
        Predicate::Compare { column, op, value }
    }

    /// `column LIKE '%term%'`
    pub fn contains(column: ColumnRef, term: &str, case_insensitive: bool) -> Self {
        Predicate::Like {
            column,
            pattern: format!("%{term}%"),
            case_insensitive,
        }
    }

    /// Every column the predicate reads, in order of appearance.
    pub fn columns(&self) -> Vec<&ColumnRef> {
        match self {
            Predicate::Compare { column, .. }
            | Predicate::Like { column, .. }
            | Predicate::In { column, .. } => vec![column],
            Predicate::Or(parts) | Predicate::And(parts) => {
                parts.iter().flat_map(Predicate::columns).collect()
            }
        }
    }

    /// Relation aliases referenced by the predicate.
    pub fn relations(&self) -> Vec<&str> {
        self.columns()
            .into_iter()
            .filter_map(|c| match &c.table {
                TableAlias::Relation(alias) => Some(alias.as_str()),
                TableAlias::Current => None,
            })
            .collect()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Compare { column, op, value } => {
                write!(f, "{column} {} {value}", op.symbol())
            }
            Predicate::Like {
                column,
                pattern,
                case_insensitive,
            } => {
                let op = if *case_insensitive { "ILIKE" } else { "LIKE" };
                write!(f, "{column} {op} {}", Value::String(pattern.clone()))
            }
            Predicate::In { column, values } => {
                let values = values
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{column} IN ({values})")
            }
            Predicate::Or(parts) => write_group(f, parts, " OR "),
            Predicate::And(parts) => write_group(f, parts, " AND "),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, parts: &[Predicate], sep: &str) -> fmt::Result {
    let parts = parts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep);
    write!(f, "({parts})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let search = Predicate::Or(vec![
            Predicate::contains(ColumnRef::current("title"), "foo", false),
            Predicate::contains(ColumnRef::current("content"), "foo", false),
        ]);
        assert_eq!(
            search.to_string(),
            "(title LIKE '%foo%' OR content LIKE '%foo%')"
        );

        let within = Predicate::In {
            column: ColumnRef::current("age"),
            values: vec![Value::Int(1), Value::Int(2), Value::Int(3)],
        };
        assert_eq!(within.to_string(), "age IN (1, 2, 3)");
    }

    #[test]
    fn test_relations() {
        let predicate = Predicate::And(vec![
            Predicate::compare(ColumnRef::current("id"), CompareOp::Gt, Value::Int(1)),
            Predicate::contains(ColumnRef::relation("Post__User", "name"), "a", true),
        ]);
        assert_eq!(predicate.relations(), vec!["Post__User"]);
        assert_eq!(predicate.columns().len(), 2);
    }
}
