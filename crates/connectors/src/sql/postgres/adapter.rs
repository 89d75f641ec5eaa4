use crate::sql::{
    base::{
        adapter::{DatabaseKind, SqlAdapter, count_from_i64},
        error::{ConnectorError, DbError},
        query::generator::QueryGenerator,
        requests::{FetchRowsRequest, ScopedQuery},
        row::DbRow,
    },
    postgres::{
        params::{PgParam, param_refs, to_typed_pg_params},
        utils::connect_client,
    },
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use planner::query::dialect;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_postgres::{Client, Statement};
use tracing::debug;

#[derive(Clone)]
pub struct PgAdapter {
    client: Arc<RwLock<Client>>,
    dialect: dialect::Postgres,
}

impl PgAdapter {
    /// Prepares `sql` so bound strings can follow the inferred parameter types.
    async fn prepare(
        client: &Client,
        sql: &str,
        params: Vec<Value>,
    ) -> Result<(Statement, Vec<PgParam>), DbError> {
        let statement = client.prepare(sql).await?;
        let bindings = to_typed_pg_params(params, statement.params())?;
        Ok((statement, bindings))
    }

    async fn rows(
        &self,
        sql: &str,
        params: Vec<Value>,
        table: &str,
    ) -> Result<Vec<RowData>, DbError> {
        let client = self.client.read().await;
        let (statement, bindings) = Self::prepare(&client, sql, params).await?;
        let rows = client.query(&statement, &param_refs(&bindings)).await?;
        Ok(rows
            .iter()
            .map(|row| DbRow::PostgresRow(row).to_row_data(table))
            .collect())
    }
}

#[async_trait]
impl SqlAdapter for PgAdapter {
    async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let client = Arc::new(RwLock::new(connect_client(url).await?));
        Ok(PgAdapter {
            client,
            dialect: dialect::Postgres,
        })
    }

    async fn exec(&self, sql: &str) -> Result<(), DbError> {
        let client = self.client.read().await;
        client.batch_execute(sql).await?;
        Ok(())
    }

    async fn query_rows(&self, sql: &str, params: Vec<Value>) -> Result<Vec<RowData>, DbError> {
        self.rows(sql, params, "").await
    }

    async fn count_rows(&self, query: &ScopedQuery) -> Result<u64, DbError> {
        let (sql, params) = QueryGenerator::new(&self.dialect).count(query);
        debug!(%sql, ?params, "Counting rows");

        let client = self.client.read().await;
        let (statement, bindings) = Self::prepare(&client, &sql, params).await?;
        let row = client.query_opt(&statement, &param_refs(&bindings)).await?;
        let count = row.map(|row| row.try_get::<_, i64>(0)).transpose()?;
        count_from_i64(count)
    }

    async fn fetch_rows(&self, request: &FetchRowsRequest) -> Result<Vec<RowData>, DbError> {
        let (sql, params) = QueryGenerator::new(&self.dialect).select(request);
        debug!(%sql, ?params, "Fetching rows");
        self.rows(&sql, params, &request.scope.table).await
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Postgres
    }
}
