//! Statement builder module

pub mod common;
pub mod query;

// Re-export types from submodules
pub use common::{IntoColumns, JoinType, SortDirection};
pub use query::Query;
