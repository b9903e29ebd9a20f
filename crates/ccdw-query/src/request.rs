//! Query request model

use indexmap::IndexMap;

/// Column selection for a warehouse query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnSpec {
    /// All columns (`SELECT *`)
    #[default]
    All,

    /// Named columns, emitted in order
    Columns(Vec<String>),

    /// Source column to output alias, emitted in insertion order
    Renamed(IndexMap<String, String>),
}

impl ColumnSpec {
    /// Select the given columns in order
    pub fn columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Columns(names.into_iter().map(Into::into).collect())
    }

    /// Select columns under new names, in insertion order
    pub fn renamed<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Renamed(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Which record versions a query returns.
///
/// `History` and `All` behave identically; only `Current` restricts the
/// result to rows with `CurrentFlag='Y'`, and only when reading the
/// configured history schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Version {
    /// Only the currently valid version of each record
    #[default]
    Current,

    /// Every stored version
    History,

    /// Every stored version
    All,
}

/// Whether to surface the generated SQL before execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebugLevel {
    /// Emit the SQL at debug level only
    #[default]
    Off,

    /// Also emit the SQL at info level
    Query,
}

/// Parameters for one warehouse query. Ephemeral: built per call,
/// discarded after execution.
///
/// # Example
///
/// ```rust,ignore
/// let request = QueryRequest::new("STUDENTS")
///     .with_columns(ColumnSpec::columns(["ID", "NAME"]))
///     .with_filter("STUDENTS.ACAD.LEVEL == 'UG'")
///     .with_version(Version::Current);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Colleague file (table) to read
    pub table: String,

    /// Columns to select
    pub columns: ColumnSpec,

    /// Filter expression in the restricted dialect (see [`crate::filter`]);
    /// empty means no filter
    pub filter: String,

    /// Schema to read from
    pub schema: String,

    /// Record versions to return
    pub version: Version,

    /// Separator substituted for `.` in returned column names
    pub separator: String,

    /// SQL debug surfacing
    pub debug: DebugLevel,
}

impl QueryRequest {
    /// Create a request with the defaults: all columns, no filter, the
    /// `history` schema, current versions, `.` separator.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: ColumnSpec::All,
            filter: String::new(),
            schema: "history".to_string(),
            version: Version::Current,
            separator: ".".to_string(),
            debug: DebugLevel::Off,
        }
    }

    /// Set the column selection
    pub fn with_columns(mut self, columns: ColumnSpec) -> Self {
        self.columns = columns;
        self
    }

    /// Set the filter expression
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Set the schema
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Set the version selection
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Set the column-name separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the debug level
    pub fn with_debug(mut self, debug: DebugLevel) -> Self {
        self.debug = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let request = QueryRequest::new("STUDENTS");
        assert_eq!(request.table, "STUDENTS");
        assert_eq!(request.columns, ColumnSpec::All);
        assert_eq!(request.filter, "");
        assert_eq!(request.schema, "history");
        assert_eq!(request.version, Version::Current);
        assert_eq!(request.separator, ".");
        assert_eq!(request.debug, DebugLevel::Off);
    }

    #[test]
    fn builders_chain() {
        let request = QueryRequest::new("COURSES")
            .with_columns(ColumnSpec::columns(["COURSES.ID"]))
            .with_filter("COURSES.SUBJECT == 'MAT'")
            .with_schema("audit")
            .with_version(Version::All)
            .with_separator("_")
            .with_debug(DebugLevel::Query);

        assert_eq!(request.schema, "audit");
        assert_eq!(request.version, Version::All);
        assert_eq!(request.separator, "_");
        assert_eq!(request.debug, DebugLevel::Query);
    }

    #[test]
    fn renamed_preserves_insertion_order() {
        let spec = ColumnSpec::renamed([("B.ONE", "First"), ("A.TWO", "Second")]);
        match spec {
            ColumnSpec::Renamed(map) => {
                let keys: Vec<&String> = map.keys().collect();
                assert_eq!(keys, ["B.ONE", "A.TWO"]);
            }
            _ => panic!("Expected renamed spec"),
        }
    }
}
