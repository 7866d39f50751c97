//! The fluent statement builder

use super::common::{IntoColumns, JoinType, SortDirection};
use crate::{Executor, QueryConfig, Result, Row, Value};
use serde::de::DeserializeOwned;

/// Accumulates clause fragments and bound parameters, then compiles them into
/// one statement.
///
/// Clauses are kept in call order and joined with a single space. Nothing is
/// validated: clause order, placeholder counts and identifiers are all the
/// caller's business, and mistakes only surface when the executor rejects the
/// statement.
///
/// `insert_into` and `set` number their own placeholders (`?1`, `?2`, ...);
/// `where_` takes whatever markers the caller wrote.
///
/// # Examples
/// ```no_run
/// # async fn demo(executor: &sqlchain_core::SqliteExecutor) -> sqlchain_core::Result<()> {
/// use sqlchain_core::{params, Query};
///
/// let mut query = Query::new(executor);
/// query
///     .insert_into("users", ["name", "age"], params!["John Doe", 30])
///     .execute()
///     .await?;
///
/// let rows = query
///     .select("name")
///     .from("users")
///     .where_("age > ?", [18])
///     .execute()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Query<'e, E> {
    executor: &'e E,
    clauses: Vec<String>,
    params: Vec<Value>,
    config: QueryConfig,
}

impl<'e, E> Query<'e, E>
where
    E: Executor,
{
    pub fn new(executor: &'e E) -> Self {
        Self::with_config(executor, QueryConfig::default())
    }

    pub fn with_config(executor: &'e E, config: QueryConfig) -> Self {
        Self {
            executor,
            clauses: Vec::new(),
            params: Vec::new(),
            config,
        }
    }

    /// `SELECT <columns>`, columns inserted verbatim (aliases included)
    pub fn select<C>(&mut self, columns: C) -> &mut Self
    where
        C: IntoColumns,
    {
        self.clauses
            .push(format!("SELECT {}", columns.into_columns().join(", ")));
        self
    }

    /// `FROM <table>`
    pub fn from(&mut self, table: &str) -> &mut Self {
        self.clauses.push(format!("FROM {}", table));
        self
    }

    /// `WHERE <predicate>` with `values` bound in order.
    ///
    /// The predicate should carry one marker per value; that is not checked.
    pub fn where_<I, V>(&mut self, predicate: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.clauses.push(format!("WHERE {}", predicate));
        self.params.extend(values.into_iter().map(Into::into));
        self
    }

    /// `INSERT INTO <table> (<fields>) VALUES (?1, ?2, ...)`, one numbered
    /// placeholder per value
    pub fn insert_into<C, I, V>(&mut self, table: &str, fields: C, values: I) -> &mut Self
    where
        C: IntoColumns,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let placeholders = (1..=values.len())
            .map(|n| format!("?{}", n))
            .collect::<Vec<_>>()
            .join(", ");

        self.clauses.push(format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            fields.into_columns().join(", "),
            placeholders
        ));
        self.params.extend(values);
        self
    }

    /// `UPDATE <table>`
    pub fn update(&mut self, table: &str) -> &mut Self {
        self.clauses.push(format!("UPDATE {}", table));
        self
    }

    /// `SET <field1> = ?1, <field2> = ?2, ...` with `values` bound in order
    pub fn set<C, I, V>(&mut self, fields: C, values: I) -> &mut Self
    where
        C: IntoColumns,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let assignments = fields
            .into_columns()
            .iter()
            .enumerate()
            .map(|(i, field)| format!("{} = ?{}", field, i + 1))
            .collect::<Vec<_>>()
            .join(", ");

        self.clauses.push(format!("SET {}", assignments));
        self.params.extend(values.into_iter().map(Into::into));
        self
    }

    /// `DELETE FROM <table>`
    pub fn delete_from(&mut self, table: &str) -> &mut Self {
        self.clauses.push(format!("DELETE FROM {}", table));
        self
    }

    /// `JOIN <table> ON <condition>`
    pub fn join(&mut self, table: &str, condition: &str) -> &mut Self {
        self.push_join(JoinType::Plain, table, condition)
    }

    /// `INNER JOIN <table> ON <condition>`
    pub fn inner_join(&mut self, table: &str, condition: &str) -> &mut Self {
        self.push_join(JoinType::Inner, table, condition)
    }

    /// `LEFT JOIN <table> ON <condition>`
    pub fn left_join(&mut self, table: &str, condition: &str) -> &mut Self {
        self.push_join(JoinType::Left, table, condition)
    }

    /// `RIGHT JOIN <table> ON <condition>`
    pub fn right_join(&mut self, table: &str, condition: &str) -> &mut Self {
        self.push_join(JoinType::Right, table, condition)
    }

    fn push_join(&mut self, join_type: JoinType, table: &str, condition: &str) -> &mut Self {
        self.clauses
            .push(format!("{} {} ON {}", join_type, table, condition));
        self
    }

    /// `ORDER BY <column> ASC|DESC`
    pub fn order_by(&mut self, column: &str, direction: SortDirection) -> &mut Self {
        self.clauses
            .push(format!("ORDER BY {} {}", column, direction));
        self
    }

    /// `LIMIT <n>`
    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.clauses.push(format!("LIMIT {}", limit));
        self
    }

    /// `OFFSET <n>`
    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.clauses.push(format!("OFFSET {}", offset));
        self
    }

    /// The compiled statement: every clause so far, space-joined in call order.
    /// Does not execute or reset anything.
    pub fn build(&self) -> String {
        self.clauses.join(" ")
    }

    /// Parameters bound so far, in bind order
    pub fn parameters(&self) -> &[Value] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.params.is_empty()
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Compile, run and return every row.
    ///
    /// Clauses and parameters are cleared before the statement is dispatched,
    /// so the builder is empty afterwards whether or not the executor
    /// succeeded. Executor failures are reported according to the configured
    /// [`ErrorMode`](crate::ErrorMode).
    pub async fn execute(&mut self) -> Result<Vec<Row>> {
        let sql = self.build();
        let params = std::mem::take(&mut self.params);
        self.clauses.clear();

        tracing::debug!(
            target: "sqlchain::sql",
            sql = %sql,
            param_count = params.len(),
            "executing statement"
        );

        match self.executor.fetch_all(&sql, &params).await {
            Ok(rows) => Ok(rows),
            Err(err) => {
                tracing::warn!(target: "sqlchain::sql", sql = %sql, error = %err, "statement failed");
                Err(self.config.error_mode.apply(err))
            }
        }
    }

    /// [`execute`](Self::execute), then deserialize each row into `T`.
    ///
    /// Booleans read back as integers; see [`Row::deserialize`].
    pub async fn execute_as<T>(&mut self) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let rows = self.execute().await?;
        rows.iter().map(Row::deserialize).collect()
    }

    /// Ask the executor to release its connection
    pub async fn close(&self) -> Result<()> {
        self.executor.close().await
    }
}
