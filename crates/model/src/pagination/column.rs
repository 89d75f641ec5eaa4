use serde::{Deserialize, Serialize};
use std::fmt;

/// The table a column is read from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableAlias {
    /// The base table of the query.
    Current,
    /// A joined relation, e.g. `Post` or `Post__User`.
    Relation(String),
}

impl TableAlias {
    pub fn relation(&self) -> Option<&str> {
        match self {
            TableAlias::Current => None,
            TableAlias::Relation(alias) => Some(alias),
        }
    }
}

/// A physical column address: owning table alias plus column name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table: TableAlias,
    pub column: String,
}

impl ColumnRef {
    pub fn current(column: &str) -> Self {
        Self {
            table: TableAlias::Current,
            column: column.to_string(),
        }
    }

    pub fn relation(alias: &str, column: &str) -> Self {
        Self {
            table: TableAlias::Relation(alias.to_string()),
            column: column.to_string(),
        }
    }

    /// The "no column" reference produced for an empty path.
    pub fn empty() -> Self {
        Self::current("")
    }

    pub fn is_empty(&self) -> bool {
        self.column.is_empty()
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            TableAlias::Current => write!(f, "{}", self.column),
            TableAlias::Relation(alias) => write!(f, "{alias}.{}", self.column),
        }
    }
}
