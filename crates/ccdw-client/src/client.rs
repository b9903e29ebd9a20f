//! Warehouse client

use crate::conn::ConnectionString;
use crate::driver::WarehouseDriver;
use crate::error::ClientError;
use crate::odbc::OdbcDriver;
use ccdw_core::{config, Config, Frame};
use ccdw_query::{build_query, DebugLevel, QueryRequest};
use std::path::Path;

/// Client for the CCDW data warehouse.
///
/// Holds the configuration and an open driver handle for the lifetime of
/// the process. `fetch` is synchronous and blocks until the warehouse
/// responds; concurrent use of one client from several threads relies on
/// the underlying ODBC driver's guarantees.
pub struct WarehouseClient {
    config: Config,
    driver: Box<dyn WarehouseDriver>,
}

impl WarehouseClient {
    /// Connect using an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] for invalid configuration and
    /// [`ClientError::Connection`] when the driver rejects the connection
    /// string or cannot reach the server.
    pub fn connect(config: Config) -> Result<Self, ClientError> {
        config.validate()?;

        let uri = ConnectionString::from_config(&config.sql).to_uri();
        tracing::debug!(
            server = %config.sql.server,
            db = %config.sql.db,
            "opening warehouse connection"
        );

        let driver = OdbcDriver::connect(&uri).map_err(ClientError::Connection)?;
        Ok(Self {
            config,
            driver: Box::new(driver),
        })
    }

    /// Connect using a configuration file (honoring the `config.location`
    /// redirect).
    pub fn connect_from_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let config = Config::from_file(path.as_ref())?;
        Self::connect(config)
    }

    /// Connect using `ccdw.toml` in the working directory
    pub fn connect_default() -> Result<Self, ClientError> {
        Self::connect_from_file(config::CONFIG_FILE)
    }

    /// Build a client over an already-open driver.
    ///
    /// This is the seam used by tests (see
    /// [`MockDriver`](crate::MockDriver)) and by callers with custom
    /// drivers.
    pub fn with_driver(
        config: Config,
        driver: Box<dyn WarehouseDriver>,
    ) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self { config, driver })
    }

    /// Fetch data from a Colleague file.
    ///
    /// Builds the SELECT statement for `request`, executes it, and renames
    /// the result columns when the request's separator is not `.`. The
    /// filter dialect is rewritten, not validated: malformed filters reach
    /// the server as-is and fail there.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Query`] wrapping the driver error on
    /// execution failure. No retry, no partial results.
    pub fn fetch(&self, request: &QueryRequest) -> Result<Frame, ClientError> {
        let sql = build_query(request, &self.config.sql.schema_history);

        match request.debug {
            DebugLevel::Query => tracing::info!(query = %sql, "generated warehouse query"),
            DebugLevel::Off => tracing::debug!(query = %sql, "generated warehouse query"),
        }

        let mut frame = self.driver.execute(&sql).map_err(ClientError::Query)?;

        if request.separator != "." {
            frame.replace_separator(&request.separator);
        }

        Ok(frame)
    }

    /// Check that the warehouse is reachable
    pub fn ping(&self) -> Result<(), ClientError> {
        self.driver.test_connection().map_err(ClientError::Connection)
    }

    /// The configured institution ID
    pub fn institution_id(&self) -> &str {
        &self.config.school.instid
    }

    /// The configured IPEDS unit ID
    pub fn ipeds_id(&self) -> &str {
        &self.config.school.ipeds
    }

    /// The loaded configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The name of the driver in use
    pub fn driver_name(&self) -> &'static str {
        self.driver.name()
    }
}
