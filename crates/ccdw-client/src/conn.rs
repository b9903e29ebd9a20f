//! ODBC connection strings
//!
//! The warehouse is reached through the system ODBC driver manager with a
//! trusted (integrated-auth) connection; no credentials appear in the
//! string. The raw connect string is carried inside a driver URI with the
//! `odbc_connect` component percent-encoded.

use ccdw_core::SqlConfig;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

use crate::driver::DriverError;

/// Client description reported to the server
const CLIENT_DESCRIPTION: &str = "ccdw WarehouseClient";

/// An ODBC connect string and its URI form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    raw: String,
}

impl ConnectionString {
    /// Build from the `[sql]` config section
    pub fn from_config(sql: &SqlConfig) -> Self {
        let raw = format!(
            "DRIVER={{{}}};SERVER={};DATABASE={};Trusted_Connection=Yes;Description={}",
            sql.driver, sql.server, sql.db, CLIENT_DESCRIPTION
        );

        Self { raw }
    }

    /// The raw ODBC connect string
    pub fn as_odbc(&self) -> &str {
        &self.raw
    }

    /// The driver URI, with the connect string percent-encoded as a URL
    /// component
    pub fn to_uri(&self) -> String {
        format!(
            "mssql+odbc:///?odbc_connect={}",
            utf8_percent_encode(&self.raw, NON_ALPHANUMERIC)
        )
    }

    /// Recover the raw connect string from a driver URI
    pub fn from_uri(uri: &str) -> Result<Self, DriverError> {
        let encoded = uri
            .split_once("odbc_connect=")
            .map(|(_, tail)| tail)
            .ok_or_else(|| {
                DriverError::Config(format!("No odbc_connect component in driver URI: {uri}"))
            })?;

        let raw = percent_decode_str(encoded)
            .decode_utf8()
            .map_err(|e| DriverError::Config(format!("Invalid percent-encoding in driver URI: {e}")))?
            .into_owned();

        Ok(Self { raw })
    }
}
