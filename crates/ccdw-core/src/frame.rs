//! In-memory tabular query results

use serde::{Deserialize, Serialize};

/// A tabular query result: ordered column names plus rows of nullable text
/// cells.
///
/// Deliberately minimal — the client carries rows back to the caller and
/// renames columns; it is not a dataframe library. `None` is SQL NULL.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Frame {
    /// Ordered column names
    pub columns: Vec<String>,

    /// Row-major cells
    pub rows: Vec<Vec<Option<String>>>,
}

impl Frame {
    /// Create an empty frame with the given column names
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a frame from string-ish column names
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(columns.into_iter().map(Into::into).collect())
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<Option<String>>) {
        self.rows.push(row);
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the frame holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace `.` in every column name with `separator`.
    ///
    /// Plain character substitution, not a pattern: Colleague field names
    /// use `.` and some downstream tools cannot.
    pub fn replace_separator(&mut self, separator: &str) {
        for name in &mut self.columns {
            *name = name.replace('.', separator);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_count() {
        let mut frame = Frame::with_columns(["ID", "NAME"]);
        assert!(frame.is_empty());

        frame.push_row(vec![Some("1".to_string()), Some("Ada".to_string())]);
        frame.push_row(vec![Some("2".to_string()), None]);

        assert_eq!(frame.row_count(), 2);
        assert_eq!(frame.column_count(), 2);
        assert!(!frame.is_empty());
    }

    #[test]
    fn separator_substitution() {
        let mut frame = Frame::with_columns(["ACAD.PROGRAM", "TERM"]);
        frame.replace_separator("_");
        assert_eq!(frame.columns, vec!["ACAD_PROGRAM", "TERM"]);
    }

    #[test]
    fn dot_separator_is_identity() {
        let mut frame = Frame::with_columns(["ACAD.PROGRAM"]);
        frame.replace_separator(".");
        assert_eq!(frame.columns, vec!["ACAD.PROGRAM"]);
    }

    #[test]
    fn serializes_to_json() {
        let mut frame = Frame::with_columns(["ID"]);
        frame.push_row(vec![None]);

        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["columns"][0], "ID");
        assert!(json["rows"][0][0].is_null());
    }
}
