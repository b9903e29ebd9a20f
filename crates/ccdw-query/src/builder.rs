//! SQL SELECT construction

use crate::filter::rewrite_filter;
use crate::request::{ColumnSpec, QueryRequest, Version};

/// Render the SELECT list for a column spec.
///
/// Empty lists and empty maps mean "all columns", matching an unspecified
/// selection.
pub fn column_clause(spec: &ColumnSpec) -> String {
    match spec {
        ColumnSpec::All => "*".to_string(),
        ColumnSpec::Columns(names) if names.is_empty() => "*".to_string(),
        ColumnSpec::Columns(names) => names
            .iter()
            .map(|name| format!("[{name}]"))
            .collect::<Vec<_>>()
            .join(", "),
        ColumnSpec::Renamed(map) if map.is_empty() => "*".to_string(),
        ColumnSpec::Renamed(map) => map
            .iter()
            .map(|(source, alias)| format!("[{source}] AS [{alias}]"))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Render the complete `WHERE` clause, or an empty string when there is
/// nothing to filter on.
///
/// `history_schema` is the configured name of the versioned schema; the
/// `CurrentFlag='Y'` condition applies only there, and only for
/// [`Version::Current`].
pub fn where_clause(filter: &str, schema: &str, version: Version, history_schema: &str) -> String {
    let body = rewrite_filter(filter);
    let current_only = version == Version::Current && schema == history_schema;

    match (body.is_empty(), current_only) {
        (true, false) => String::new(),
        (true, true) => "WHERE CurrentFlag='Y'".to_string(),
        (false, false) => format!("WHERE {body}"),
        (false, true) => format!("WHERE {body} AND CurrentFlag='Y'"),
    }
}

/// Build the full SELECT statement for a request.
///
/// Table and column identifiers are trusted as-is; only the filter values
/// go through the rewrite rules.
pub fn build_query(request: &QueryRequest, history_schema: &str) -> String {
    let columns = column_clause(&request.columns);
    let where_sql = where_clause(
        &request.filter,
        &request.schema,
        request.version,
        history_schema,
    );

    if where_sql.is_empty() {
        format!("SELECT {columns} FROM {}.{}", request.schema, request.table)
    } else {
        format!(
            "SELECT {columns} FROM {}.{} {where_sql}",
            request.schema, request.table
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HISTORY: &str = "history";

    #[test]
    fn all_columns_is_star() {
        assert_eq!(column_clause(&ColumnSpec::All), "*");
    }

    #[test]
    fn empty_list_is_star() {
        assert_eq!(column_clause(&ColumnSpec::Columns(Vec::new())), "*");
    }

    #[test]
    fn empty_map_is_star() {
        let spec = ColumnSpec::Renamed(indexmap::IndexMap::new());
        assert_eq!(column_clause(&spec), "*");
    }

    #[test]
    fn columns_are_bracketed_in_order() {
        let spec = ColumnSpec::columns(["ID", "LAST.NAME", "FIRST.NAME"]);
        assert_eq!(column_clause(&spec), "[ID], [LAST.NAME], [FIRST.NAME]");
    }

    #[test]
    fn renamed_columns_alias_in_map_order() {
        let spec = ColumnSpec::renamed([("ACAD.PROGRAM", "Program"), ("ID", "StudentId")]);
        assert_eq!(
            column_clause(&spec),
            "[ACAD.PROGRAM] AS [Program], [ID] AS [StudentId]"
        );
    }

    #[test]
    fn no_filter_no_version_flag_is_empty() {
        assert_eq!(where_clause("", HISTORY, Version::All, HISTORY), "");
    }

    #[test]
    fn current_with_empty_filter_is_flag_only() {
        assert_eq!(
            where_clause("", HISTORY, Version::Current, HISTORY),
            "WHERE CurrentFlag='Y'"
        );
    }

    #[test]
    fn current_appends_flag_to_filter() {
        assert_eq!(
            where_clause("A.B == 1", HISTORY, Version::Current, HISTORY),
            "WHERE [A.B] = 1 AND CurrentFlag='Y'"
        );
    }

    #[test]
    fn history_version_never_injects_flag() {
        assert_eq!(
            where_clause("A.B == 1", HISTORY, Version::History, HISTORY),
            "WHERE [A.B] = 1"
        );
        assert_eq!(where_clause("", HISTORY, Version::History, HISTORY), "");
    }

    #[test]
    fn non_history_schema_never_injects_flag() {
        assert_eq!(where_clause("", "audit", Version::Current, HISTORY), "");
        assert_eq!(
            where_clause("A.B == 1", "audit", Version::Current, HISTORY),
            "WHERE [A.B] = 1"
        );
    }

    #[test]
    fn statement_has_no_trailing_space_without_filter() {
        let request = QueryRequest::new("STUDENTS").with_version(Version::All);
        assert_eq!(build_query(&request, HISTORY), "SELECT * FROM history.STUDENTS");
    }
}
