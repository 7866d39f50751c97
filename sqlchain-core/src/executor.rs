//! Statement execution interface

use crate::{Result, Row, Value};
use std::future::Future;

/// The engine a [`Query`](crate::Query) hands compiled statements to.
///
/// Implementations own their connection; builders only borrow them.
pub trait Executor: Send + Sync {
    /// Run raw SQL with no parameters and discard any rows
    fn execute_batch(&self, sql: &str) -> impl Future<Output = Result<()>> + Send;

    /// Prepare `sql`, bind `params` positionally and return every row.
    /// Statements that produce no rows return an empty vec.
    fn fetch_all(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Result<Vec<Row>>> + Send;

    /// Release the underlying connection
    fn close(&self) -> impl Future<Output = Result<()>> + Send;
}

/// SQLite executor backed by an sqlx pool
#[cfg(feature = "sqlite")]
pub mod sqlite {
    use super::*;
    use crate::placeholders::number_placeholders;
    use crate::{ExecutorConfig, JournalMode};
    use sqlx::query::Query;
    use sqlx::sqlite::{
        Sqlite, SqliteArguments, SqliteConnectOptions, SqliteJournalMode, SqlitePool,
        SqlitePoolOptions, SqliteRow,
    };
    use sqlx::{Column, Row as _, TypeInfo, ValueRef};
    use std::str::FromStr;

    /// SQLite executor
    #[derive(Clone, Debug)]
    pub struct SqliteExecutor {
        inner: SqlitePool,
    }

    impl SqliteExecutor {
        /// Open the database described by `config` and create the default
        /// table if one is configured.
        ///
        /// The journal mode is part of the connect options, so every pooled
        /// connection gets it, including ones the pool opens later.
        pub async fn connect(config: &ExecutorConfig) -> Result<Self> {
            config.validate()?;

            let options = SqliteConnectOptions::from_str(&config.url)?
                .create_if_missing(true)
                .journal_mode(config.journal_mode.into());
            let pool_options = if config.is_in_memory() {
                // every connection to :memory: is a separate database
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
            } else {
                SqlitePoolOptions::new().max_connections(config.max_connections)
            };
            let pool = pool_options.connect_with(options).await?;

            tracing::info!(
                target: "sqlchain::executor",
                url = %config.url,
                journal_mode = %config.journal_mode,
                "connected to sqlite"
            );

            let executor = Self { inner: pool };

            if let Some(ddl) = &config.default_table {
                tracing::debug!(target: "sqlchain::executor", ddl = %ddl, "ensuring default table");
                executor.execute_batch(ddl).await?;
            }

            Ok(executor)
        }

        /// Wrap an existing pool as-is
        pub fn from_pool(pool: SqlitePool) -> Self {
            Self { inner: pool }
        }

        pub fn pool(&self) -> &SqlitePool {
            &self.inner
        }
    }

    impl Executor for SqliteExecutor {
        async fn execute_batch(&self, sql: &str) -> Result<()> {
            sqlx::query(sql).execute(&self.inner).await?;
            Ok(())
        }

        async fn fetch_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
            let sql = number_placeholders(sql);
            let query = bind_values_to_query(sqlx::query(&sql), params);
            let rows = query.fetch_all(&self.inner).await?;
            rows.iter().map(sqlite_row_to_row).collect()
        }

        async fn close(&self) -> Result<()> {
            tracing::debug!(target: "sqlchain::executor", "closing sqlite pool");
            self.inner.close().await;
            Ok(())
        }
    }

    impl From<JournalMode> for SqliteJournalMode {
        fn from(mode: JournalMode) -> Self {
            match mode {
                JournalMode::Delete => SqliteJournalMode::Delete,
                JournalMode::Truncate => SqliteJournalMode::Truncate,
                JournalMode::Persist => SqliteJournalMode::Persist,
                JournalMode::Memory => SqliteJournalMode::Memory,
                JournalMode::Wal => SqliteJournalMode::Wal,
                JournalMode::Off => SqliteJournalMode::Off,
            }
        }
    }

    /// Bind sqlchain Values to a SQLx query
    fn bind_values_to_query<'q>(
        mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
        params: &'q [Value],
    ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
        for param in params {
            query = match param {
                Value::Null => query.bind(None::<i64>),
                Value::Bool(b) => query.bind(*b),
                Value::Integer(i) => query.bind(*i),
                Value::Real(f) => query.bind(*f),
                Value::Text(s) => query.bind(s.as_str()),
                Value::Blob(b) => query.bind(b.as_slice()),
            };
        }
        query
    }

    /// Decode each cell by the storage class of the value actually stored,
    /// not the declared column type.
    fn sqlite_row_to_row(row: &SqliteRow) -> Result<Row> {
        let mut out = Row::default();
        for column in row.columns() {
            let idx = column.ordinal();
            let raw = row.try_get_raw(idx)?;
            let value = if raw.is_null() {
                Value::Null
            } else {
                match raw.type_info().name() {
                    "INTEGER" | "BOOLEAN" => Value::Integer(row.try_get_unchecked::<i64, _>(idx)?),
                    "REAL" => Value::Real(row.try_get_unchecked::<f64, _>(idx)?),
                    "BLOB" => Value::Blob(row.try_get_unchecked::<Vec<u8>, _>(idx)?),
                    _ => Value::Text(row.try_get_unchecked::<String, _>(idx)?),
                }
            };
            out.push(column.name(), value);
        }
        Ok(out)
    }

}
