use crate::{
    error::AdapterError,
    sql::{
        base::adapter::{DatabaseKind, SqlAdapter},
        mysql::adapter::MySqlAdapter,
        postgres::adapter::PgAdapter,
        sqlite::adapter::SqliteAdapter,
    },
};

#[derive(Clone)]
pub enum Adapter {
    MySql(MySqlAdapter),
    Postgres(PgAdapter),
    Sqlite(SqliteAdapter),
}

impl Adapter {
    pub async fn connect(kind: DatabaseKind, url: &str) -> Result<Self, AdapterError> {
        let adapter = match kind {
            DatabaseKind::MySql => Adapter::MySql(MySqlAdapter::connect(url).await?),
            DatabaseKind::Postgres => Adapter::Postgres(PgAdapter::connect(url).await?),
            DatabaseKind::Sqlite => Adapter::Sqlite(SqliteAdapter::connect(url).await?),
        };
        Ok(adapter)
    }

    /// Connects to the backend named by the URL scheme.
    pub async fn from_url(url: &str) -> Result<Self, AdapterError> {
        let kind = DatabaseKind::from_url(url).ok_or_else(|| {
            AdapterError::UnsupportedKind(url.split(':').next().unwrap_or_default().to_string())
        })?;
        Self::connect(kind, url).await
    }

    pub fn get_sql(&self) -> &(dyn SqlAdapter + Send + Sync) {
        match self {
            Adapter::MySql(adapter) => adapter,
            Adapter::Postgres(adapter) => adapter,
            Adapter::Sqlite(adapter) => adapter,
        }
    }

    pub fn kind(&self) -> DatabaseKind {
        self.get_sql().kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connects_sqlite_from_url() {
        let adapter = Adapter::from_url("sqlite::memory:").await.unwrap();
        assert_eq!(adapter.kind(), DatabaseKind::Sqlite);
    }

    #[tokio::test]
    async fn test_unsupported_scheme() {
        let err = Adapter::from_url("redis://localhost").await.err().unwrap();
        assert!(matches!(err, AdapterError::UnsupportedKind(ref scheme) if scheme == "redis"));
    }
}
