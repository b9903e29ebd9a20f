//! ODBC warehouse driver
//!
//! Executes queries through the system ODBC driver manager (SQL Server in
//! production). Compiled in with the `odbc` cargo feature:
//!
//! ```text
//! cargo build --features odbc
//! ```
//!
//! Results come back as text row-set batches and are collected into a
//! [`Frame`]. The ODBC environment is a process-lifetime singleton; each
//! driver owns one connection, and calls on a shared driver serialize on an
//! internal lock because ODBC connections do not support concurrent use.

use crate::driver::{DriverError, WarehouseDriver};
use ccdw_core::Frame;

#[cfg(feature = "odbc")]
use crate::conn::ConnectionString;
#[cfg(feature = "odbc")]
use odbc_api::{buffers::TextRowSet, ConnectionOptions, Cursor, Environment, ResultSetMetadata};
#[cfg(feature = "odbc")]
use std::sync::{Mutex, OnceLock};

/// Rows fetched per batch
#[cfg(feature = "odbc")]
const BATCH_SIZE: usize = 5000;

/// Upper bound on a single text cell, in bytes
#[cfg(feature = "odbc")]
const MAX_CELL_BYTES: usize = 4096;

#[cfg(feature = "odbc")]
fn environment() -> Result<&'static Environment, DriverError> {
    static ENV: OnceLock<Environment> = OnceLock::new();

    if let Some(env) = ENV.get() {
        return Ok(env);
    }

    let env = Environment::new()
        .map_err(|e| DriverError::Connection(format!("Failed to initialize ODBC: {e}")))?;
    Ok(ENV.get_or_init(|| env))
}

/// Driver backed by the system ODBC driver manager
pub struct OdbcDriver {
    /// Open connection (only available with the odbc feature)
    #[cfg(feature = "odbc")]
    connection: Mutex<odbc_api::Connection<'static>>,

    /// Placeholder for when the feature is disabled
    #[cfg(not(feature = "odbc"))]
    _phantom: std::marker::PhantomData<()>,
}

impl OdbcDriver {
    /// Open a connection from a driver URI (see
    /// [`ConnectionString::to_uri`](crate::ConnectionString::to_uri)).
    #[cfg(feature = "odbc")]
    pub fn connect(uri: &str) -> Result<Self, DriverError> {
        let conn = ConnectionString::from_uri(uri)?;
        let env = environment()?;

        let connection = env
            .connect_with_connection_string(conn.as_odbc(), ConnectionOptions::default())
            .map_err(|e| DriverError::Connection(format!("Failed to connect to warehouse: {e}")))?;

        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    /// Open a connection without the odbc feature (returns an error)
    #[cfg(not(feature = "odbc"))]
    pub fn connect(_uri: &str) -> Result<Self, DriverError> {
        Err(DriverError::Config(
            "ODBC support not compiled. Rebuild with: cargo build --features odbc".to_string(),
        ))
    }
}

impl WarehouseDriver for OdbcDriver {
    fn name(&self) -> &'static str {
        "ODBC"
    }

    #[cfg(feature = "odbc")]
    fn execute(&self, sql: &str) -> Result<Frame, DriverError> {
        let connection = self
            .connection
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let maybe_cursor = connection
            .execute(sql, (), None)
            .map_err(|e| DriverError::Query(e.to_string()))?;

        // Statements without a result set (unlikely for SELECTs) come back
        // as an empty frame rather than an error.
        let Some(mut cursor) = maybe_cursor else {
            return Ok(Frame::default());
        };

        let columns: Vec<String> = cursor
            .column_names()
            .map_err(|e| DriverError::Query(e.to_string()))?
            .collect::<Result<_, _>>()
            .map_err(|e| DriverError::Query(e.to_string()))?;
        let mut frame = Frame::new(columns);

        let mut buffers = TextRowSet::for_cursor(BATCH_SIZE, &mut cursor, Some(MAX_CELL_BYTES))
            .map_err(|e| DriverError::Query(e.to_string()))?;
        let mut row_set_cursor = cursor
            .bind_buffer(&mut buffers)
            .map_err(|e| DriverError::Query(e.to_string()))?;

        while let Some(batch) = row_set_cursor
            .fetch()
            .map_err(|e| DriverError::Query(e.to_string()))?
        {
            for row in 0..batch.num_rows() {
                let cells = (0..batch.num_cols())
                    .map(|col| {
                        batch
                            .at(col, row)
                            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                    })
                    .collect();
                frame.push_row(cells);
            }
        }

        Ok(frame)
    }

    #[cfg(not(feature = "odbc"))]
    fn execute(&self, _sql: &str) -> Result<Frame, DriverError> {
        Err(DriverError::Config(
            "ODBC support not compiled. Rebuild with: cargo build --features odbc".to_string(),
        ))
    }

    fn test_connection(&self) -> Result<(), DriverError> {
        self.execute("SELECT 1").map(|_| ())
    }
}
