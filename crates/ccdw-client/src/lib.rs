//! Warehouse client for CCDW Colleague data
//!
//! Owns the connection configuration and a database driver handle, and
//! exposes `fetch` for reading Colleague files out of the warehouse.
//!
//! ## Features
//!
//! The real SQL Server driver goes through the system ODBC driver manager
//! and is compiled in with the `odbc` cargo feature. Without it, only the
//! in-memory [`MockDriver`] is available (enough for tests and for
//! generating SQL).
//!
//! ## Example
//!
//! ```rust,ignore
//! use ccdw_client::WarehouseClient;
//! use ccdw_query::{ColumnSpec, QueryRequest};
//!
//! let client = WarehouseClient::connect_default()?;
//! let frame = client.fetch(
//!     &QueryRequest::new("STUDENTS")
//!         .with_columns(ColumnSpec::columns(["ID", "LAST.NAME"]))
//!         .with_filter("STUDENTS.ACAD.LEVEL == 'UG'")
//!         .with_separator("_"),
//! )?;
//! ```

pub mod client;
pub mod conn;
pub mod driver;
pub mod error;
pub mod mock;
pub mod odbc;

pub use client::WarehouseClient;
pub use conn::ConnectionString;
pub use driver::{DriverError, WarehouseDriver};
pub use error::ClientError;
pub use mock::MockDriver;
pub use odbc::OdbcDriver;
