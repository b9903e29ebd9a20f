//! CCDW Core
//!
//! Configuration schema and the tabular result type shared by the query
//! builder, the warehouse client and the CLI.

pub mod config;
pub mod frame;

pub use config::{Config, ConfigError, ConfigLocation, SchoolConfig, SqlConfig};
pub use frame::Frame;
