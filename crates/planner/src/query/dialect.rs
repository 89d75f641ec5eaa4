//! Defines the `Dialect` trait for database-specific SQL syntax.

use model::core::value::Value;

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect, doubling any embedded quote.
    ///
    /// - PostgreSQL and SQLite use double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL uses `?`
    /// - SQLite uses `?1`, `?2`, etc.
    fn get_placeholder(&self, index: usize) -> String;

    /// Placeholder for a bound value. Dialects that need explicit parameter
    /// types override this.
    fn param_placeholder(&self, index: usize, _value: &Value) -> String {
        self.get_placeholder(index)
    }

    /// Whether the dialect has a native case-insensitive `ILIKE`.
    fn supports_ilike(&self) -> bool {
        false
    }

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;
}

fn quote_with(ident: &str, quote: char) -> String {
    let escaped = ident.replace(quote, &format!("{quote}{quote}"));
    format!("{quote}{escaped}{quote}")
}

#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl Postgres {
    fn param_type(value: &Value) -> Option<&'static str> {
        match value {
            Value::Int(_) | Value::Uint(_) => Some("int8"),
            Value::Float(_) => Some("float8"),
            Value::Boolean(_) => Some("bool"),
            Value::Json(_) => Some("jsonb"),
            Value::Uuid(_) => Some("uuid"),
            Value::Bytes(_) => Some("bytea"),
            Value::Date(_) => Some("date"),
            Value::Timestamp(_) => Some("timestamptz"),
            Value::TimestampNaive(_) => Some("timestamp"),
            // Untyped strings take the type the server infers from context.
            Value::String(_) | Value::Null => None,
        }
    }
}

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        quote_with(ident, '"')
    }

    fn get_placeholder(&self, index: usize) -> String {
        // PostgreSQL uses $1, $2, etc.
        format!("${}", index + 1)
    }

    fn param_placeholder(&self, index: usize, value: &Value) -> String {
        // An explicit cast keeps e.g. an i64 comparable against an int4 column.
        match Self::param_type(value) {
            Some(cast) => format!("{}::{cast}", self.get_placeholder(index)),
            None => self.get_placeholder(index),
        }
    }

    fn supports_ilike(&self) -> bool {
        true
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        quote_with(ident, '`')
    }

    fn get_placeholder(&self, _index: usize) -> String {
        // MySQL uses ?
        "?".into()
    }

    fn name(&self) -> String {
        "MySQL".into()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn quote_identifier(&self, ident: &str) -> String {
        quote_with(ident, '"')
    }

    fn get_placeholder(&self, index: usize) -> String {
        format!("?{}", index + 1)
    }

    fn name(&self) -> String {
        "SQLite".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier_escapes() {
        assert_eq!(Postgres.quote_identifier("title"), r#""title""#);
        assert_eq!(Postgres.quote_identifier(r#"a"b"#), r#""a""b""#);
        assert_eq!(MySql.quote_identifier("a`b"), "`a``b`");
        assert_eq!(Sqlite.quote_identifier("Post__User"), r#""Post__User""#);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(Postgres.get_placeholder(0), "$1");
        assert_eq!(MySql.get_placeholder(3), "?");
        assert_eq!(Sqlite.get_placeholder(1), "?2");
    }

    #[test]
    fn test_postgres_casts_typed_params() {
        assert_eq!(Postgres.param_placeholder(0, &Value::Int(1)), "$1::int8");
        assert_eq!(Postgres.param_placeholder(1, &Value::from("90")), "$2");
        assert_eq!(Postgres.param_placeholder(2, &Value::Null), "$3");
        assert_eq!(MySql.param_placeholder(0, &Value::Int(1)), "?");
    }
}
