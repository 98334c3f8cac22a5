//! CREATE TABLE statement builder.
//!
//! ```text
//! CREATE [TEMP | TEMPORARY] TABLE [IF NOT EXISTS] [schema.]name
//!     ( column-def, ... [, table-constraint, ...] ) [WITHOUT ROWID] [, STRICT]
//! CREATE [TEMP | TEMPORARY] TABLE [IF NOT EXISTS] [schema.]name AS select
//! ```
//!
//! Columns cannot follow a table constraint:
//!
//! ```compile_fail
//! use sqlrail_core::builder::Create;
//! use sqlrail_core::definition::{check, column};
//! use sqlrail_core::expr::{col, ExprTrait};
//!
//! let _ = Create
//!     .table()
//!     .name("t")
//!     .column(column("a"))
//!     .constraint(check(col("a").gt(0)))
//!     .column(column("b"));
//! ```
//!
//! A table needs at least one column before it is complete:
//!
//! ```compile_fail
//! use sqlrail_core::builder::Create;
//! use sqlrail_core::Statement;
//!
//! let _ = Create.table().name("t").to_sql();
//! ```

use std::fmt;
use std::marker::PhantomData;

use super::create_index::{IndexStart, UniqueIndex};
use super::create_virtual_table::VirtualTableStart;
use super::select::SelectQuery;
use crate::definition::{ColumnDef, TableConstraint};
use crate::error::{collect_at_least, Result};
use crate::name::QualifiedName;
use crate::render::{render_comma_list, SqlElement, Statement};

/// The `CREATE` keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct Create;

impl Create {
    /// `CREATE TABLE`
    pub fn table(self) -> TableStart {
        TableStart {
            temp: None,
            if_not_exists: false,
        }
    }

    /// `CREATE TEMP`
    pub fn temp(self) -> CreateTemp {
        CreateTemp("TEMP")
    }

    /// `CREATE TEMPORARY`
    pub fn temporary(self) -> CreateTemp {
        CreateTemp("TEMPORARY")
    }

    /// `CREATE INDEX`
    pub fn index(self) -> IndexStart {
        IndexStart::new(false)
    }

    /// `CREATE UNIQUE`
    pub const fn unique(self) -> UniqueIndex {
        UniqueIndex
    }

    /// `CREATE VIRTUAL TABLE`
    pub fn virtual_table(self) -> VirtualTableStart {
        VirtualTableStart::new()
    }
}

/// `CREATE TEMP` or `CREATE TEMPORARY`, waiting for `TABLE`.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct CreateTemp(&'static str);

impl CreateTemp {
    /// `... TABLE`
    pub fn table(self) -> TableStart {
        TableStart {
            temp: Some(self.0),
            if_not_exists: false,
        }
    }
}

/// `CREATE ... TABLE`, before the table name.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct TableStart {
    temp: Option<&'static str>,
    if_not_exists: bool,
}

impl TableStart {
    /// `... IF NOT EXISTS`
    pub fn if_not_exists(self) -> TableIfNotExists {
        TableIfNotExists(Self {
            if_not_exists: true,
            ..self
        })
    }

    /// `... [schema.]name`
    pub fn name(self, name: impl Into<QualifiedName>) -> TableNamed {
        TableNamed {
            head: TableHead {
                temp: self.temp,
                if_not_exists: self.if_not_exists,
                name: name.into(),
            },
        }
    }
}

/// `CREATE TABLE IF NOT EXISTS`, before the table name.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct TableIfNotExists(TableStart);

impl TableIfNotExists {
    /// `... [schema.]name`
    pub fn name(self, name: impl Into<QualifiedName>) -> TableNamed {
        self.0.name(name)
    }
}

#[derive(Debug, Clone)]
struct TableHead {
    temp: Option<&'static str>,
    if_not_exists: bool,
    name: QualifiedName,
}

impl SqlElement for TableHead {
    fn render_into(&self, buf: &mut String) {
        buf.push_str("CREATE ");
        if let Some(temp) = self.temp {
            buf.push_str(temp);
            buf.push(' ');
        }
        buf.push_str("TABLE ");
        if self.if_not_exists {
            buf.push_str("IF NOT EXISTS ");
        }
        self.name.render_into(buf);
    }
}

/// `CREATE TABLE name`, waiting for the body.
#[derive(Debug, Clone)]
#[must_use]
pub struct TableNamed {
    head: TableHead,
}

impl TableNamed {
    fn body(self, columns: Vec<ColumnDef>) -> CreateTable<ColumnsOnly> {
        CreateTable {
            head: self.head,
            columns,
            constraints: vec![],
            options: vec![],
            _state: PhantomData,
        }
    }

    /// `... (column`
    pub fn column(self, column: impl Into<ColumnDef>) -> CreateTable<ColumnsOnly> {
        self.body(vec![column.into()])
    }

    /// `... (column, ...`
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::InsufficientOperands`] for an empty
    /// list.
    pub fn columns<I>(self, columns: I) -> Result<CreateTable<ColumnsOnly>>
    where
        I: IntoIterator,
        I::Item: Into<ColumnDef>,
    {
        let columns = collect_at_least("table definition", 1, columns.into_iter().map(Into::into))?;
        Ok(self.body(columns))
    }

    /// `... AS select`
    pub fn as_select(self, query: impl Into<SelectQuery>) -> CreateTableAs {
        CreateTableAs {
            head: self.head,
            query: query.into(),
        }
    }
}

// Typestate markers

/// Marker: only columns so far; more columns or a constraint may follow.
pub struct ColumnsOnly;
/// Marker: at least one table constraint; only constraints may follow.
pub struct WithConstraints;
/// Marker: a table option has been written.
pub struct TableOptions;

/// States where the parenthesized body is still open.
pub trait TableBody {}
impl TableBody for ColumnsOnly {}
impl TableBody for WithConstraints {}

/// States from which `WITHOUT ROWID` or `STRICT` may be added.
pub trait AcceptsTableOption {}
impl<S: TableBody> AcceptsTableOption for S {}
impl AcceptsTableOption for TableOptions {}

/// `CREATE TABLE name (...)`
#[must_use]
pub struct CreateTable<S> {
    head: TableHead,
    columns: Vec<ColumnDef>,
    constraints: Vec<TableConstraint>,
    options: Vec<&'static str>,
    _state: PhantomData<S>,
}

impl<S> Clone for CreateTable<S> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            columns: self.columns.clone(),
            constraints: self.constraints.clone(),
            options: self.options.clone(),
            _state: PhantomData,
        }
    }
}

impl<S> fmt::Debug for CreateTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateTable")
            .field("head", &self.head)
            .field("columns", &self.columns)
            .field("constraints", &self.constraints)
            .field("options", &self.options)
            .finish()
    }
}

impl<S> CreateTable<S> {
    fn transition<T>(self) -> CreateTable<T> {
        CreateTable {
            head: self.head,
            columns: self.columns,
            constraints: self.constraints,
            options: self.options,
            _state: PhantomData,
        }
    }
}

impl CreateTable<ColumnsOnly> {
    /// Adds a column.
    pub fn column(mut self, column: impl Into<ColumnDef>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Adds every column of `columns`.
    pub fn columns<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ColumnDef>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }
}

impl<S: TableBody> CreateTable<S> {
    /// Adds a table constraint; no column may follow it.
    pub fn constraint(
        mut self,
        constraint: impl Into<TableConstraint>,
    ) -> CreateTable<WithConstraints> {
        self.constraints.push(constraint.into());
        self.transition()
    }
}

impl<S: AcceptsTableOption> CreateTable<S> {
    /// Each option appears at most once; repeating one keeps its first
    /// position.
    fn option(mut self, option: &'static str) -> CreateTable<TableOptions> {
        if !self.options.contains(&option) {
            self.options.push(option);
        }
        self.transition()
    }

    /// `... WITHOUT ROWID`
    pub fn without_rowid(self) -> CreateTable<TableOptions> {
        self.option("WITHOUT ROWID")
    }

    /// `... STRICT`
    pub fn strict(self) -> CreateTable<TableOptions> {
        self.option("STRICT")
    }
}

impl<S> SqlElement for CreateTable<S> {
    fn render_into(&self, buf: &mut String) {
        self.head.render_into(buf);
        buf.push_str(" (");
        render_comma_list(&self.columns, buf);
        for constraint in &self.constraints {
            buf.push_str(", ");
            constraint.render_into(buf);
        }
        buf.push(')');
        for (i, option) in self.options.iter().enumerate() {
            buf.push_str(if i == 0 { " " } else { ", " });
            buf.push_str(option);
        }
    }
}

impl<S> Statement for CreateTable<S> {}

/// `CREATE TABLE name AS select`
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateTableAs {
    head: TableHead,
    query: SelectQuery,
}

impl SqlElement for CreateTableAs {
    fn render_into(&self, buf: &mut String) {
        self.head.render_into(buf);
        buf.push_str(" AS ");
        self.query.render_into(buf);
    }
}

impl Statement for CreateTableAs {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{table, Select};
    use crate::definition::{
        check, column, constraint, foreign_key, primary_key, ColumnConstraints, ForeignKeyAction,
    };
    use crate::expr::{col, ExprTrait};
    use crate::types::DataType;

    #[test]
    fn test_minimal_table() {
        let stmt = Create.table().name("t").column(column("a"));
        assert_eq!(stmt.to_sql(), "CREATE TABLE t (a)");
    }

    #[test]
    fn test_temp_if_not_exists_schema() {
        let stmt = Create
            .temp()
            .table()
            .if_not_exists()
            .name(("temp", "t"))
            .column(column("a").typed(DataType::Integer));
        assert_eq!(stmt.to_sql(), "CREATE TEMP TABLE IF NOT EXISTS temp.t (a INTEGER)");
        let stmt = Create.temporary().table().name("t").column(column("a"));
        assert_eq!(stmt.to_sql(), "CREATE TEMPORARY TABLE t (a)");
    }

    #[test]
    fn test_columns_constraints_and_options() {
        let stmt = Create
            .table()
            .name("users")
            .column(column("id").typed(DataType::Integer).primary_key())
            .column(column("email").typed(DataType::Text).not_null().unique())
            .column(column("team_id").typed(DataType::Integer))
            .constraint(
                foreign_key(["team_id"])
                    .unwrap()
                    .references("teams")
                    .columns(["id"])
                    .unwrap()
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .constraint(constraint("id_positive").check(col("id").gt(0)))
            .without_rowid()
            .strict();
        assert_eq!(
            stmt.to_sql(),
            "CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT NOT NULL UNIQUE, \
             team_id INTEGER, FOREIGN KEY (team_id) REFERENCES teams (id) ON DELETE CASCADE, \
             CONSTRAINT id_positive CHECK (id > 0)) WITHOUT ROWID, STRICT"
        );
    }

    #[test]
    fn test_options_in_invocation_order() {
        let stmt = Create
            .table()
            .name("t")
            .column(column("a").typed(DataType::Integer))
            .constraint(primary_key(["a"]).unwrap())
            .strict()
            .without_rowid();
        assert_eq!(
            stmt.to_sql(),
            "CREATE TABLE t (a INTEGER, PRIMARY KEY (a)) STRICT, WITHOUT ROWID"
        );
    }

    #[test]
    fn test_repeated_options_render_once() {
        let stmt = Create
            .table()
            .name("t")
            .column(column("a").typed(DataType::Integer).primary_key())
            .without_rowid()
            .strict()
            .without_rowid()
            .strict();
        assert_eq!(
            stmt.to_sql(),
            "CREATE TABLE t (a INTEGER PRIMARY KEY) WITHOUT ROWID, STRICT"
        );
    }

    #[test]
    fn test_columns_from_iterator() {
        let stmt = Create
            .table()
            .name("t")
            .columns([column("a"), column("b")])
            .unwrap()
            .constraint(check(col("a").lt(col("b"))));
        assert_eq!(stmt.to_sql(), "CREATE TABLE t (a, b, CHECK (a < b))");
        assert!(Create
            .table()
            .name("t")
            .columns(Vec::<ColumnDef>::new())
            .is_err());
    }

    #[test]
    fn test_as_select() {
        let stmt = Create
            .table()
            .if_not_exists()
            .name("copy")
            .as_select(Select.star().from(table("orig")));
        assert_eq!(
            stmt.to_sql(),
            "CREATE TABLE IF NOT EXISTS copy AS SELECT * FROM orig"
        );
    }
}
