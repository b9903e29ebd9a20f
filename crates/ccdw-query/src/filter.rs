//! Filter-expression translation
//!
//! Converts the restricted filter dialect accepted by
//! [`QueryRequest`](crate::QueryRequest) — dotted Colleague field names,
//! `==`/`!=` against scalars or bracketed lists (`[A,B,C]`), combined with
//! `AND`/`OR` — into the body of a SQL Server `WHERE` clause.
//!
//! The translation is a fixed sequence of string substitutions. The stages
//! are not commutative: list rewrites must run before identifier bracketing
//! (brackets would otherwise shadow the list syntax), and the bare
//! `==`/`!=` replacements must run last.
//!
//! Filter syntax is not validated. Unbalanced brackets or stray tokens pass
//! through the pipeline untouched and can produce SQL the server rejects;
//! this is a documented limitation, not an error condition.

use regex::Regex;
use std::sync::OnceLock;

/// `!= [LIST]` occurrences; capture 1 is the list text.
fn neq_list_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!= \[([^\]]+)\]").expect("valid != list regex"))
}

/// `== [LIST]` occurrences; capture 1 is the list text.
fn eq_list_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"== \[([^\]]+)\]").expect("valid == list regex"))
}

/// Dotted field names, with optional surrounding brackets so an
/// already-wrapped name can be recognized and left alone.
fn field_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[?[A-Za-z]\w*\.[\w.]+\]?").expect("valid field regex"))
}

/// Rewrite a filter expression into the body of a `WHERE` clause (the
/// `WHERE` keyword itself is added by the builder). Empty input produces
/// empty output.
///
/// Stages, in order over the current string:
///
/// 1. For every `!= [LIST]` occurrence, the matching `== [LIST]` text is
///    replaced with `NOT IN (LIST)`. Note the asymmetry: the `!=` form
///    selects the list, the `==` form is what gets substituted. A lone
///    `!= [LIST]` therefore survives to stage 5 and ends up as
///    `<> [list]`. This reproduces the long-standing behavior of the
///    pipeline; the tests pin it down — do not "fix" it without auditing
///    every caller's filters.
/// 2. Every remaining `== [LIST]` becomes `IN (LIST)`.
/// 3. Dotted field names are wrapped in `[...]`. One pass over the string,
///    so a name appearing several times is wrapped once per occurrence, and
///    names already wrapped are left alone.
/// 4. Remaining `==` becomes `=`.
/// 5. Remaining `!=` becomes `<>`.
pub fn rewrite_filter(filter: &str) -> String {
    if filter.is_empty() {
        return String::new();
    }

    let mut clause = filter.to_string();

    let lists: Vec<String> = neq_list_regex()
        .captures_iter(&clause)
        .map(|caps| caps[1].to_string())
        .collect();
    for list in lists {
        clause = clause.replace(&format!("== [{list}]"), &format!("NOT IN ({list})"));
    }

    let lists: Vec<String> = eq_list_regex()
        .captures_iter(&clause)
        .map(|caps| caps[1].to_string())
        .collect();
    for list in lists {
        clause = clause.replace(&format!("== [{list}]"), &format!("IN ({list})"));
    }

    clause = field_regex()
        .replace_all(&clause, |caps: &regex::Captures<'_>| {
            let token = &caps[0];
            if token.starts_with('[') && token.ends_with(']') {
                token.to_string()
            } else {
                format!("[{token}]")
            }
        })
        .into_owned();

    clause = clause.replace("==", "=");
    clause.replace("!=", "<>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_is_empty() {
        assert_eq!(rewrite_filter(""), "");
    }

    #[test]
    fn equality_becomes_sql() {
        assert_eq!(rewrite_filter("A.B == 1"), "[A.B] = 1");
    }

    #[test]
    fn inequality_becomes_sql() {
        assert_eq!(rewrite_filter("A.B != 'X'"), "[A.B] <> 'X'");
    }

    #[test]
    fn dotted_fields_are_bracketed() {
        assert_eq!(
            rewrite_filter("STUDENTS.ACAD.LEVEL == 'UG'"),
            "[STUDENTS.ACAD.LEVEL] = 'UG'"
        );
    }

    #[test]
    fn undotted_names_are_untouched() {
        assert_eq!(rewrite_filter("STATUS == 'A'"), "STATUS = 'A'");
    }

    #[test]
    fn repeated_field_is_wrapped_once_per_occurrence() {
        assert_eq!(
            rewrite_filter("A.B == 1 OR A.B == 2"),
            "[A.B] = 1 OR [A.B] = 2"
        );
    }

    #[test]
    fn already_bracketed_field_is_not_double_wrapped() {
        assert_eq!(rewrite_filter("[A.B] == 1"), "[A.B] = 1");
    }

    #[test]
    fn list_equality_becomes_in() {
        assert_eq!(
            rewrite_filter("A.B == ['X','Y']"),
            "[A.B] IN ('X','Y')"
        );
    }

    // The != stage substitutes against the == counterpart text, so a lone
    // != [list] is left for the <> stage. Pinned deliberately; see the
    // rewrite_filter docs.
    #[test]
    fn lone_list_inequality_falls_through() {
        assert_eq!(
            rewrite_filter("A.B != ['X','Y']"),
            "[A.B] <> ['X','Y']"
        );
    }

    #[test]
    fn list_inequality_rewrites_the_eq_counterpart() {
        assert_eq!(
            rewrite_filter("A.B != [1,2] AND A.B == [1,2]"),
            "[A.B] <> [1,2] AND [A.B] NOT IN (1,2)"
        );
    }

    #[test]
    fn and_or_combinators_pass_through() {
        assert_eq!(
            rewrite_filter("A.B == 1 AND C.D != 2 OR E.F == 3"),
            "[A.B] = 1 AND [C.D] <> 2 OR [E.F] = 3"
        );
    }

    #[test]
    fn list_items_with_dots_are_bracketed_too() {
        // List items that look like dotted fields get wrapped as well;
        // callers quote list values to avoid this.
        assert_eq!(
            rewrite_filter("TERMS.ID == [FA.2024,SP.2025]"),
            "[TERMS.ID] IN ([FA.2024],[SP.2025])"
        );
    }
}
