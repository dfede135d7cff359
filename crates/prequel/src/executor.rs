//! Statement execution against a PostgreSQL connection.
//!
//! The core compiles statements to text plus a parameter list; everything
//! network-shaped lives behind the [`Executor`] trait so repositories can
//! take either a client or an open transaction. Compiled SQL carries
//! dialect-neutral `?` placeholders; they are renumbered to the `$n` form
//! the wire protocol expects immediately before execution.

use crate::compile::ParameterizedQuery;
use crate::error::{QueryError, QueryResult};
use crate::query::{DeleteStatement, InsertStatement, SelectStatement, UpdateStatement};
use crate::row::FromRow;
use std::future::Future;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A connection-like handle that can run queries: a client or a
/// transaction.
pub trait Executor: Send + Sync {
    /// Run a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = QueryResult<Vec<Row>>> + Send;

    /// Run a statement and return the affected row count.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = QueryResult<u64>> + Send;
}

impl Executor for tokio_postgres::Client {
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = QueryResult<Vec<Row>>> + Send {
        async move { Ok(tokio_postgres::Client::query(self, sql, params).await?) }
    }

    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = QueryResult<u64>> + Send {
        async move { Ok(tokio_postgres::Client::execute(self, sql, params).await?) }
    }
}

impl Executor for tokio_postgres::Transaction<'_> {
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = QueryResult<Vec<Row>>> + Send {
        async move { Ok(tokio_postgres::Transaction::query(self, sql, params).await?) }
    }

    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = QueryResult<u64>> + Send {
        async move { Ok(tokio_postgres::Transaction::execute(self, sql, params).await?) }
    }
}

async fn run_query(conn: &impl Executor, query: &ParameterizedQuery) -> QueryResult<Vec<Row>> {
    let sql = query.numbered_sql();
    tracing::debug!(target: "prequel::sql", %sql, params = query.params.len(), "query");
    conn.query(&sql, &query.params_ref()).await
}

async fn run_execute(conn: &impl Executor, query: &ParameterizedQuery) -> QueryResult<u64> {
    let sql = query.numbered_sql();
    tracing::debug!(target: "prequel::sql", %sql, params = query.params.len(), "execute");
    conn.execute(&sql, &query.params_ref()).await
}

impl SelectStatement {
    /// Run the query and map every row.
    pub async fn fetch<T: FromRow>(&self, conn: &impl Executor) -> QueryResult<Vec<T>> {
        let query = self.to_parameterized()?;
        let rows = run_query(conn, &query).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Run the query and map the first row, if any.
    pub async fn fetch_first<T: FromRow>(&self, conn: &impl Executor) -> QueryResult<Option<T>> {
        let query = self.to_parameterized()?;
        let rows = run_query(conn, &query).await?;
        rows.first().map(T::from_row).transpose()
    }

    /// Run the query and require exactly one row.
    pub async fn fetch_one<T: FromRow>(&self, conn: &impl Executor) -> QueryResult<T> {
        let query = self.to_parameterized()?;
        let rows = run_query(conn, &query).await?;
        match rows.len() {
            0 => Err(QueryError::not_found("expected 1 row, got 0")),
            1 => T::from_row(&rows[0]),
            n => Err(QueryError::TooManyRows(n)),
        }
    }

    /// Run the derived count query.
    pub async fn fetch_count(&self, conn: &impl Executor) -> QueryResult<i64> {
        let query = self.to_parameterized_count()?;
        let rows = run_query(conn, &query).await?;
        let row = rows
            .first()
            .ok_or_else(|| QueryError::not_found("count query returned no rows"))?;
        row.try_get(0)
            .map_err(|e| QueryError::decode("count", e.to_string()))
    }
}

impl InsertStatement {
    /// Run the insert and return the affected row count.
    pub async fn execute(&self, conn: &impl Executor) -> QueryResult<u64> {
        run_execute(conn, &self.to_parameterized()?).await
    }
}

impl UpdateStatement {
    /// Run the update and return the affected row count.
    pub async fn execute(&self, conn: &impl Executor) -> QueryResult<u64> {
        run_execute(conn, &self.to_parameterized()?).await
    }
}

impl DeleteStatement {
    /// Run the delete and return the affected row count.
    pub async fn execute(&self, conn: &impl Executor) -> QueryResult<u64> {
        run_execute(conn, &self.to_parameterized()?).await
    }
}
