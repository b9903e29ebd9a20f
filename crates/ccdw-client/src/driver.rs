//! Warehouse driver seam

use ccdw_core::Frame;

/// Errors surfaced by warehouse drivers
#[derive(Debug, Clone, thiserror::Error)]
pub enum DriverError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Trait for drivers that can execute SQL against the warehouse.
///
/// Implementations block the calling thread until the server responds;
/// there is no cancellation, timeout override or retry at this layer.
pub trait WarehouseDriver: Send + Sync {
    /// Driver name (e.g. "ODBC", "Mock")
    fn name(&self) -> &'static str;

    /// Execute a SQL statement and return the full result set
    fn execute(&self, sql: &str) -> Result<Frame, DriverError>;

    /// Check that the warehouse is reachable
    fn test_connection(&self) -> Result<(), DriverError>;
}
