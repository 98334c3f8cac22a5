#![allow(dead_code)]

use rusqlite::Connection;
use sqlrail_core::Statement;

/// Opens a fresh in-memory SQLite database.
pub fn memory_db() -> Connection {
    Connection::open_in_memory().unwrap_or_else(|e| panic!("Failed to open database: {e}"))
}

/// Renders `stmt`, runs it and returns the SQL that was executed.
pub fn execute(conn: &Connection, stmt: &impl Statement) -> String {
    let sql = stmt.to_sql();
    execute_sql(conn, &sql);
    sql
}

/// Runs raw SQL, typically fixtures the builder does not cover (INSERT).
pub fn execute_sql(conn: &Connection, sql: &str) {
    conn.execute_batch(sql)
        .unwrap_or_else(|e| panic!("Failed to execute: {sql}\nError: {e}"));
}

/// Runs a query and collects its first column as integers.
pub fn query_i64(conn: &Connection, stmt: &impl Statement) -> Vec<i64> {
    let sql = stmt.to_sql();
    let mut prepared = conn
        .prepare(&sql)
        .unwrap_or_else(|e| panic!("Failed to prepare: {sql}\nError: {e}"));
    let rows = prepared
        .query_map([], |row| row.get::<_, i64>(0))
        .unwrap_or_else(|e| panic!("Failed to query: {sql}\nError: {e}"));
    rows.collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("Failed to read rows: {sql}\nError: {e}"))
}

/// Runs a query and collects its first column as text.
pub fn query_text(conn: &Connection, stmt: &impl Statement) -> Vec<String> {
    let sql = stmt.to_sql();
    let mut prepared = conn
        .prepare(&sql)
        .unwrap_or_else(|e| panic!("Failed to prepare: {sql}\nError: {e}"));
    let rows = prepared
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap_or_else(|e| panic!("Failed to query: {sql}\nError: {e}"));
    rows.collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| panic!("Failed to read rows: {sql}\nError: {e}"))
}

/// Checks that SQLite accepts the statement without running it.
pub fn assert_prepares(conn: &Connection, stmt: &impl Statement) {
    let sql = stmt.to_sql();
    if let Err(e) = conn.prepare(&sql) {
        panic!("SQLite rejected: {sql}\nError: {e}");
    }
}
