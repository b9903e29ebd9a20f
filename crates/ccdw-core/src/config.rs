//! Configuration schema (ccdw.toml)

use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up for redirected configuration documents.
pub const CONFIG_FILE: &str = "ccdw.toml";

fn default_location() -> String {
    "self".to_string()
}

fn default_history_schema() -> String {
    "history".to_string()
}

/// `[config]` section: where the real configuration document lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigLocation {
    /// `"self"`, or a directory prefix holding the document to load instead
    #[serde(default = "default_location")]
    pub location: String,
}

impl Default for ConfigLocation {
    fn default() -> Self {
        Self {
            location: default_location(),
        }
    }
}

/// `[sql]` section: warehouse connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlConfig {
    /// ODBC driver name (e.g. "ODBC Driver 18 for SQL Server")
    pub driver: String,

    /// Warehouse server address
    pub server: String,

    /// Database name
    pub db: String,

    /// Schema holding versioned/historical records
    #[serde(default = "default_history_schema")]
    pub schema_history: String,
}

/// `[school]` section: institution identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolConfig {
    /// Institution ID
    pub instid: String,

    /// IPEDS unit ID
    pub ipeds: String,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Location redirect
    #[serde(default)]
    pub config: ConfigLocation,

    /// Warehouse connection settings
    pub sql: SqlConfig,

    /// Institution identifiers
    pub school: SchoolConfig,
}

impl Config {
    /// Load config from a TOML file, honoring the `config.location`
    /// redirect.
    ///
    /// When the loaded document's `config.location` is not `"self"`, it
    /// names a directory prefix and the `ccdw.toml` found there is loaded
    /// instead. Exactly one level of indirection is followed; the
    /// redirected document is taken as final.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_document(path)?;

        if config.config.location == "self" {
            return Ok(config);
        }

        let redirected = Path::new(&config.config.location).join(CONFIG_FILE);
        Self::load_document(&redirected)
    }

    /// Load config from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Reject configurations whose connection fields are present but empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("sql.driver", &self.sql.driver),
            ("sql.server", &self.sql.server),
            ("sql.db", &self.sql.db),
        ];

        for (field, value) in required {
            if value.is_empty() {
                return Err(ConfigError::MissingField(field.to_string()));
            }
        }

        Ok(())
    }

    fn load_document(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        Self::from_toml(&contents)
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Missing value: {0}")]
    MissingField(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
        [config]
        location = "self"

        [sql]
        driver = "ODBC Driver 18 for SQL Server"
        server = "warehouse.example.edu"
        db = "CCDW"
        schema_history = "history"

        [school]
        instid = "12345"
        ipeds = "198668"
    "#;

    #[test]
    fn parse_full_document() {
        let config = Config::from_toml(FULL).unwrap();
        assert_eq!(config.sql.server, "warehouse.example.edu");
        assert_eq!(config.sql.schema_history, "history");
        assert_eq!(config.school.ipeds, "198668");
    }

    #[test]
    fn defaults_apply_when_omitted() {
        let config = Config::from_toml(
            r#"
            [sql]
            driver = "d"
            server = "s"
            db = "x"

            [school]
            instid = "1"
            ipeds = "2"
            "#,
        )
        .unwrap();

        assert_eq!(config.config.location, "self");
        assert_eq!(config.sql.schema_history, "history");
    }

    #[test]
    fn missing_section_is_parse_error() {
        let result = Config::from_toml("[sql]\ndriver = \"d\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn validate_rejects_empty_server() {
        let mut config = Config::from_toml(FULL).unwrap();
        config.sql.server = String::new();

        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::MissingField(f)) if f == "sql.server"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = Config::from_file(Path::new("/nonexistent/ccdw.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn location_redirect_loads_second_document() {
        let outer = tempfile::tempdir().unwrap();
        let inner = tempfile::tempdir().unwrap();

        let pointer = format!(
            "[config]\nlocation = \"{}\"\n\n{}",
            inner.path().display(),
            &FULL[FULL.find("[sql]").unwrap()..]
        );
        let pointer_path = outer.path().join(CONFIG_FILE);
        std::fs::write(&pointer_path, pointer).unwrap();

        let redirected = FULL.replace("warehouse.example.edu", "redirected.example.edu");
        std::fs::write(inner.path().join(CONFIG_FILE), redirected).unwrap();

        let config = Config::from_file(&pointer_path).unwrap();
        assert_eq!(config.sql.server, "redirected.example.edu");
    }

    #[test]
    fn self_location_loads_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, FULL).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.sql.server, "warehouse.example.edu");
    }
}
