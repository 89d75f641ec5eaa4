use crate::sql::{
    base::{
        adapter::{DatabaseKind, SqlAdapter, count_from_i64},
        error::{ConnectorError, DbError},
        query::generator::QueryGenerator,
        requests::{FetchRowsRequest, ScopedQuery},
        row::DbRow,
    },
    mysql::params::to_mysql_params,
};
use async_trait::async_trait;
use model::{core::value::Value, records::row::RowData};
use mysql_async::{Opts, Pool, Row, prelude::Queryable};
use planner::query::dialect;
use tracing::debug;

#[derive(Clone)]
pub struct MySqlAdapter {
    pool: Pool,
    dialect: dialect::MySql,
}

impl MySqlAdapter {
    async fn rows(
        &self,
        sql: &str,
        params: Vec<Value>,
        table: &str,
    ) -> Result<Vec<RowData>, DbError> {
        let mut conn = self.pool.get_conn().await?;
        let rows: Vec<Row> = conn.exec(sql, to_mysql_params(&params)).await?;
        Ok(rows
            .iter()
            .map(|row| DbRow::MySqlRow(row).to_row_data(table))
            .collect())
    }
}

#[async_trait]
impl SqlAdapter for MySqlAdapter {
    async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let opts = Opts::from_url(url).map_err(|e| ConnectorError::InvalidUrl(e.to_string()))?;
        let pool = Pool::new(opts);
        // Surface connection errors at connect time.
        drop(pool.get_conn().await?);
        Ok(MySqlAdapter {
            pool,
            dialect: dialect::MySql,
        })
    }

    async fn exec(&self, sql: &str) -> Result<(), DbError> {
        let mut conn = self.pool.get_conn().await?;
        conn.query_drop(sql).await?;
        Ok(())
    }

    async fn query_rows(&self, sql: &str, params: Vec<Value>) -> Result<Vec<RowData>, DbError> {
        self.rows(sql, params, "").await
    }

    async fn count_rows(&self, query: &ScopedQuery) -> Result<u64, DbError> {
        let (sql, params) = QueryGenerator::new(&self.dialect).count(query);
        debug!(%sql, ?params, "Counting rows");

        let mut conn = self.pool.get_conn().await?;
        let count: Option<i64> = conn.exec_first(sql.as_str(), to_mysql_params(&params)).await?;
        count_from_i64(count)
    }

    async fn fetch_rows(&self, request: &FetchRowsRequest) -> Result<Vec<RowData>, DbError> {
        let (sql, params) = QueryGenerator::new(&self.dialect).select(request);
        debug!(%sql, ?params, "Fetching rows");
        self.rows(&sql, params, &request.scope.table).await
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::MySql
    }
}
