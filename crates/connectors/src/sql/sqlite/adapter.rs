use crate::sql::{
    base::{
        adapter::{DatabaseKind, SqlAdapter, count_from_i64},
        error::{ConnectorError, DbError},
        query::generator::QueryGenerator,
        requests::{FetchRowsRequest, ScopedQuery},
    },
    sqlite::{
        params::to_sqlite_values,
        row::{statement_columns, to_row_data},
    },
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use planner::query::dialect;
use rusqlite::{Connection, params_from_iter};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// SQLite through rusqlite. The connection is synchronous, so every call runs
/// on tokio's blocking pool.
#[derive(Clone)]
pub struct SqliteAdapter {
    conn: Arc<Mutex<Connection>>,
    dialect: dialect::Sqlite,
}

/// `None` for an in-memory database, otherwise the file path.
fn database_path(url: &str) -> Option<&str> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);
    match path {
        "" | ":memory:" => None,
        path => Some(path),
    }
}

impl SqliteAdapter {
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            dialect: dialect::Sqlite,
        }
    }

    async fn blocking<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Connection) -> Result<T, DbError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| DbError::Unknown("SQLite connection lock poisoned".into()))?;
            f(&guard)
        })
        .await?
    }

    async fn rows(
        &self,
        sql: String,
        params: Vec<Value>,
        table: String,
    ) -> Result<Vec<RowData>, DbError> {
        self.blocking(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let columns = statement_columns(&stmt);
            let mut rows = stmt.query(params_from_iter(to_sqlite_values(&params)))?;

            let mut result = Vec::new();
            while let Some(row) = rows.next()? {
                result.push(to_row_data(&table, &columns, row)?);
            }
            Ok(result)
        })
        .await
    }
}

#[async_trait]
impl SqlAdapter for SqliteAdapter {
    async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let path = database_path(url).map(str::to_string);
        let conn = tokio::task::spawn_blocking(move || match path {
            Some(path) => Connection::open(path),
            None => Connection::open_in_memory(),
        })
        .await??;
        Ok(Self::from_connection(conn))
    }

    async fn exec(&self, sql: &str) -> Result<(), DbError> {
        let sql = sql.to_string();
        self.blocking(move |conn| Ok(conn.execute_batch(&sql)?)).await
    }

    async fn query_rows(&self, sql: &str, params: Vec<Value>) -> Result<Vec<RowData>, DbError> {
        self.rows(sql.to_string(), params, String::new()).await
    }

    async fn count_rows(&self, query: &ScopedQuery) -> Result<u64, DbError> {
        let (sql, params) = QueryGenerator::new(&self.dialect).count(query);
        debug!(%sql, ?params, "Counting rows");

        let count = self
            .blocking(move |conn| {
                let count: i64 = conn.query_row(
                    &sql,
                    params_from_iter(to_sqlite_values(&params)),
                    |row| row.get(0),
                )?;
                Ok(count)
            })
            .await?;
        count_from_i64(Some(count))
    }

    async fn fetch_rows(&self, request: &FetchRowsRequest) -> Result<Vec<RowData>, DbError> {
        let (sql, params) = QueryGenerator::new(&self.dialect).select(request);
        debug!(%sql, ?params, "Fetching rows");
        self.rows(sql, params, request.scope.table.clone()).await
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Sqlite
    }
}
