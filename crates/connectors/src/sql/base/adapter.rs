use crate::sql::base::{
    error::{ConnectorError, DbError},
    requests::{FetchRowsRequest, ScopedQuery},
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseKind {
    MySql,
    Postgres,
    Sqlite,
}

impl DatabaseKind {
    /// Infers the backend from a connection URL scheme.
    pub fn from_url(url: &str) -> Option<Self> {
        let scheme = url.split(':').next().unwrap_or_default();
        scheme.parse().ok()
    }
}

impl FromStr for DatabaseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(DatabaseKind::MySql),
            "postgres" | "postgresql" | "pg" => Ok(DatabaseKind::Postgres),
            "sqlite" => Ok(DatabaseKind::Sqlite),
            other => Err(format!("Unknown database kind: {other}")),
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatabaseKind::MySql => "mysql",
            DatabaseKind::Postgres => "postgres",
            DatabaseKind::Sqlite => "sqlite",
        };
        f.write_str(name)
    }
}

/// The relational backend boundary. Count and fetch take the same
/// [`ScopedQuery`], so both see identical joins and predicates.
#[async_trait]
pub trait SqlAdapter: Send + Sync {
    async fn connect(url: &str) -> Result<Self, ConnectorError>
    where
        Self: Sized;

    async fn exec(&self, sql: &str) -> Result<(), DbError>;

    async fn query_rows(&self, sql: &str, params: Vec<Value>) -> Result<Vec<RowData>, DbError>;

    async fn count_rows(&self, query: &ScopedQuery) -> Result<u64, DbError>;

    async fn fetch_rows(&self, request: &FetchRowsRequest) -> Result<Vec<RowData>, DbError>;

    fn kind(&self) -> DatabaseKind;
}

/// Reads a `COUNT(*)` result, which every backend returns as a signed integer.
pub(crate) fn count_from_i64(count: Option<i64>) -> Result<u64, DbError> {
    let count = count.ok_or_else(|| DbError::Decode("count query returned no rows".into()))?;
    u64::try_from(count).map_err(|_| DbError::Decode(format!("negative row count: {count}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_url() {
        assert_eq!(
            DatabaseKind::from_url("postgres://user:pw@localhost:5432/db"),
            Some(DatabaseKind::Postgres)
        );
        assert_eq!(
            DatabaseKind::from_url("mysql://user@localhost/db"),
            Some(DatabaseKind::MySql)
        );
        assert_eq!(
            DatabaseKind::from_url("sqlite::memory:"),
            Some(DatabaseKind::Sqlite)
        );
        assert_eq!(DatabaseKind::from_url("redis://localhost"), None);
    }

    #[test]
    fn test_count_from_i64() {
        assert_eq!(count_from_i64(Some(42)).unwrap(), 42);
        assert!(matches!(count_from_i64(None), Err(DbError::Decode(_))));
        assert!(matches!(count_from_i64(Some(-1)), Err(DbError::Decode(_))));
    }
}
