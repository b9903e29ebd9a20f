//! Mock warehouse driver for testing
//!
//! Returns canned frames without touching a database. Useful for unit
//! testing query construction and client behavior, and for CI where no
//! warehouse is reachable.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ccdw_client::{MockDriver, WarehouseDriver};
//! use ccdw_core::Frame;
//!
//! let driver = MockDriver::new()
//!     .with_frame("SELECT 1", Frame::with_columns(["1"]))
//!     .with_default_frame(Frame::with_columns(["ID"]));
//!
//! let frame = driver.execute("SELECT 1")?;
//! assert_eq!(driver.executed(), vec!["SELECT 1"]);
//! ```

use crate::driver::{DriverError, WarehouseDriver};
use ccdw_core::Frame;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Mock driver backed by in-memory frames.
///
/// Results are keyed by exact SQL text; `with_default_frame` supplies a
/// fallback for any other statement. Every executed statement is recorded
/// so tests can assert on the generated SQL. Clones share state.
#[derive(Clone, Default)]
pub struct MockDriver {
    /// Frames keyed by exact SQL text
    frames: Arc<Mutex<HashMap<String, Frame>>>,

    /// Errors keyed by exact SQL text
    errors: Arc<Mutex<HashMap<String, DriverError>>>,

    /// Fallback frame for unmatched statements
    default_frame: Arc<Mutex<Option<Frame>>>,

    /// Every statement passed to `execute`, in order
    executed: Arc<Mutex<Vec<String>>>,

    /// Simulate connection failure
    fail_connection: bool,
}

impl MockDriver {
    /// Create a mock driver with no canned results
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `frame` for the exact statement `sql`
    pub fn with_frame(self, sql: impl Into<String>, frame: Frame) -> Self {
        lock(&self.frames).insert(sql.into(), frame);
        self
    }

    /// Return `frame` for any statement without a specific result
    pub fn with_default_frame(self, frame: Frame) -> Self {
        *lock(&self.default_frame) = Some(frame);
        self
    }

    /// Return `error` for the exact statement `sql`
    pub fn with_error(self, sql: impl Into<String>, error: DriverError) -> Self {
        lock(&self.errors).insert(sql.into(), error);
        self
    }

    /// Fail all connection tests
    pub fn with_connection_failure(mut self) -> Self {
        self.fail_connection = true;
        self
    }

    /// Every statement executed so far, in order
    pub fn executed(&self) -> Vec<String> {
        lock(&self.executed).clone()
    }

    /// The most recently executed statement
    pub fn last_executed(&self) -> Option<String> {
        lock(&self.executed).last().cloned()
    }
}

impl WarehouseDriver for MockDriver {
    fn name(&self) -> &'static str {
        "Mock"
    }

    fn execute(&self, sql: &str) -> Result<Frame, DriverError> {
        lock(&self.executed).push(sql.to_string());

        if let Some(error) = lock(&self.errors).get(sql) {
            return Err(error.clone());
        }

        if let Some(frame) = lock(&self.frames).get(sql) {
            return Ok(frame.clone());
        }

        if let Some(frame) = lock(&self.default_frame).clone() {
            return Ok(frame);
        }

        Err(DriverError::Query(format!(
            "No mock result registered for: {sql}"
        )))
    }

    fn test_connection(&self) -> Result<(), DriverError> {
        if self.fail_connection {
            Err(DriverError::Connection(
                "Simulated connection failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}
