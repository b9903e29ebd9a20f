//! Client error taxonomy

use crate::driver::DriverError;
use ccdw_core::ConfigError;

/// Errors returned by [`WarehouseClient`](crate::WarehouseClient)
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Configuration missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The driver could not reach the warehouse
    #[error("Connection failed: {0}")]
    Connection(DriverError),

    /// Query execution failed; wraps the driver error verbatim
    #[error("Query failed: {0}")]
    Query(DriverError),
}
