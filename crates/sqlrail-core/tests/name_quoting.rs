//! Identifier quoting properties.

mod common;

use common::*;
use proptest::prelude::*;
use sqlrail_core::name::{quote_if_necessary, Name};
use sqlrail_core::prelude::*;

#[test]
fn quoting_vectors() {
    let cases = [
        ("", "\"\""),
        ("abc", "abc"),
        ("a1", "a1"),
        ("a.c", "\"a.c\""),
        ("10", "\"10\""),
        ("_10", "_10"),
        ("a\"2\"1", "\"a\"\"2\"\"1\""),
    ];
    for (raw, expected) in cases {
        assert_eq!(quote_if_necessary(raw, false), expected, "input {raw:?}");
        assert_eq!(Name::new(raw).as_sql(), expected, "input {raw:?}");
    }
}

fn is_plain(raw: &str) -> bool {
    raw.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ===================================================================
// Properties
// ===================================================================

proptest! {
    /// Plain identifiers pass through untouched.
    #[test]
    fn prop_plain_identifiers_are_bare(raw in "[A-Za-z_][A-Za-z0-9_]{0,20}") {
        prop_assert_eq!(quote_if_necessary(&raw, false), raw);
    }

    /// Anything else is wrapped in double quotes with quotes doubled.
    #[test]
    fn prop_other_strings_are_quoted(raw in "\\PC{0,16}") {
        prop_assume!(!is_plain(&raw));
        let expected = format!("\"{}\"", raw.replace('"', "\"\""));
        prop_assert_eq!(quote_if_necessary(&raw, false), expected);
    }

    /// Forced quoting always quotes.
    #[test]
    fn prop_forced_quoting(raw in "[A-Za-z_][A-Za-z0-9_]{0,20}") {
        prop_assert_eq!(quote_if_necessary(&raw, true), format!("\"{raw}\""));
    }

    /// SQLite reads back exactly the name that was written.
    #[test]
    fn prop_sqlite_sees_the_raw_name(raw in "\\PC{1,12}") {
        // Bare names may collide with keywords; quoted ones never do.
        prop_assume!(!is_plain(&raw));
        prop_assume!(!raw.to_ascii_lowercase().starts_with("sqlite_"));
        let conn = memory_db();
        execute(
            &conn,
            &Create.table().name(raw.as_str()).column(column("v").typed(DataType::Integer)),
        );
        let stored: String = conn
            .query_row("SELECT name FROM sqlite_master WHERE type = 'table'", [], |row| row.get(0))
            .unwrap();
        prop_assert_eq!(stored, raw);
    }
}
