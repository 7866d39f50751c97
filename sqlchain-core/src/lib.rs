//! sqlchain Core - a fluent SQL statement builder
//!
//! A [`Query`] collects clause fragments and bound parameters across chained
//! calls, compiles them into one parameterized statement and runs it through
//! an [`Executor`]. The builder validates nothing; it only keeps clauses in
//! call order and parameters in bind order.

pub mod builder;
pub mod config;
pub mod error;
pub mod executor;
#[cfg(feature = "sqlite")]
mod placeholders;
pub mod row;
pub mod value;

// Re-export main types
pub use builder::{IntoColumns, JoinType, Query, SortDirection};
pub use config::{ErrorMode, ExecutorConfig, JournalMode, QueryConfig};
pub use error::{Error, Result, QUERY_EXECUTION_FAILED};
pub use executor::Executor;
#[cfg(feature = "sqlite")]
pub use executor::sqlite::SqliteExecutor;
pub use row::Row;
pub use value::Value;

/// Create a new statement builder over `executor`
pub fn query<E: Executor>(executor: &E) -> Query<'_, E> {
    Query::new(executor)
}

/// Build a `Vec<Value>` from mixed-type expressions
///
/// # Examples
/// ```
/// use sqlchain_core::{params, Value};
///
/// let values = params!["John Doe", 42, true, None::<i64>];
/// assert_eq!(values[1], Value::Integer(42));
/// assert_eq!(values[3], Value::Null);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}
