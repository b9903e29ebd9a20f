//! Query construction for the CCDW warehouse client
//!
//! Pure string translation from high-level request parameters to a SQL
//! Server SELECT statement: no I/O, no connection handling. The interesting
//! part is the filter rewrite pipeline in [`filter`], which converts the
//! restricted filter dialect into a `WHERE` body through a fixed sequence of
//! substitution stages.

pub mod builder;
pub mod filter;
pub mod request;

pub use builder::{build_query, column_clause, where_clause};
pub use filter::rewrite_filter;
pub use request::{ColumnSpec, DebugLevel, QueryRequest, Version};
