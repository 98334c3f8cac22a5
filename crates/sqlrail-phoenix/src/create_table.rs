//! Phoenix `CREATE TABLE`.
//!
//! ```text
//! CREATE TABLE [IF NOT EXISTS] ref (column, ... [CONSTRAINT name PRIMARY KEY(...)])
//!     [option, ...] [SPLIT ON(point, ...)]
//! ```
//!
//! The primary key constraint follows the last column after a space, with
//! no separating comma. Table options are opaque `KEY=value` text.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use sqlrail_core::error::{collect_at_least, Result};
use sqlrail_core::expr::{Expr, IntoExpr};
use sqlrail_core::name::QualifiedName;
use sqlrail_core::render::{render, render_comma_list, SqlElement, Statement};

use crate::column::PhoenixColumn;
use crate::constraint::PrimaryKeyConstraint;

/// The `CREATE TABLE` keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateTable;

impl CreateTable {
    /// `CREATE TABLE IF NOT EXISTS`
    pub const fn if_not_exists(self) -> CreateTableIfNotExists {
        CreateTableIfNotExists
    }

    /// `CREATE TABLE ref`
    pub fn name(self, name: impl Into<QualifiedName>) -> TableNamed {
        TableNamed {
            if_not_exists: false,
            name: name.into(),
        }
    }
}

/// `CREATE TABLE IF NOT EXISTS`, waiting for the table reference.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct CreateTableIfNotExists;

impl CreateTableIfNotExists {
    /// `CREATE TABLE IF NOT EXISTS ref`
    pub fn name(self, name: impl Into<QualifiedName>) -> TableNamed {
        TableNamed {
            if_not_exists: true,
            name: name.into(),
        }
    }
}

/// `CREATE TABLE ref`, waiting for the first column.
#[derive(Debug, Clone)]
#[must_use]
pub struct TableNamed {
    if_not_exists: bool,
    name: QualifiedName,
}

impl TableNamed {
    fn body(self, columns: Vec<PhoenixColumn>) -> CreateTableStatement<Columns> {
        CreateTableStatement {
            data: Arc::new(TableData {
                if_not_exists: self.if_not_exists,
                name: self.name,
                columns,
                primary_key: None,
                options: vec![],
                split_points: vec![],
            }),
            _state: PhantomData,
        }
    }

    /// `... (column`
    pub fn column(self, column: impl Into<PhoenixColumn>) -> CreateTableStatement<Columns> {
        self.body(vec![column.into()])
    }

    /// `... (column, ...`
    ///
    /// # Errors
    ///
    /// Returns [`sqlrail_core::BuildError::InsufficientOperands`] for an
    /// empty list.
    pub fn columns<I>(self, columns: I) -> Result<CreateTableStatement<Columns>>
    where
        I: IntoIterator,
        I::Item: Into<PhoenixColumn>,
    {
        let columns = collect_at_least("table definition", 1, columns.into_iter().map(Into::into))?;
        Ok(self.body(columns))
    }
}

#[derive(Debug, Clone)]
struct TableData {
    if_not_exists: bool,
    name: QualifiedName,
    columns: Vec<PhoenixColumn>,
    primary_key: Option<PrimaryKeyConstraint>,
    options: Vec<Arc<str>>,
    split_points: Vec<Expr>,
}

impl SqlElement for TableData {
    fn render_into(&self, buf: &mut String) {
        buf.push_str(if self.if_not_exists {
            "CREATE TABLE IF NOT EXISTS "
        } else {
            "CREATE TABLE "
        });
        self.name.render_into(buf);
        buf.push_str(" (");
        render_comma_list(&self.columns, buf);
        if let Some(pk) = &self.primary_key {
            buf.push(' ');
            pk.render_into(buf);
        }
        buf.push(')');
        for (i, option) in self.options.iter().enumerate() {
            buf.push_str(if i == 0 { " " } else { ", " });
            buf.push_str(option);
        }
        if !self.split_points.is_empty() {
            buf.push_str(" SPLIT ON(");
            render_comma_list(&self.split_points, buf);
            buf.push(')');
        }
    }
}

// Typestate markers

/// Marker: columns only.
pub struct Columns;
/// Marker: primary key constraint written; the column list is closed.
pub struct Constrained;
/// Marker: at least one table option written.
pub struct WithOptions;
/// Marker: split points written; nothing may follow.
pub struct Split;

/// States that accept the primary key constraint.
pub trait AcceptsConstraint {}
impl AcceptsConstraint for Columns {}

/// States that accept table options.
pub trait AcceptsOptions {}
impl<S: AcceptsConstraint> AcceptsOptions for S {}
impl AcceptsOptions for Constrained {}
impl AcceptsOptions for WithOptions {}

/// States that accept `SPLIT ON`.
pub trait AcceptsSplit {}
impl<S: AcceptsOptions> AcceptsSplit for S {}

/// A Phoenix `CREATE TABLE` statement; every state is complete.
#[must_use]
pub struct CreateTableStatement<S> {
    data: Arc<TableData>,
    _state: PhantomData<S>,
}

impl<S> Clone for CreateTableStatement<S> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            _state: PhantomData,
        }
    }
}

impl<S> fmt::Debug for CreateTableStatement<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateTableStatement")
            .field("sql", &render(self))
            .finish()
    }
}

impl<S> CreateTableStatement<S> {
    fn transition<T>(self) -> CreateTableStatement<T> {
        CreateTableStatement {
            data: self.data,
            _state: PhantomData,
        }
    }

    fn data_mut(&mut self) -> &mut TableData {
        Arc::make_mut(&mut self.data)
    }
}

impl CreateTableStatement<Columns> {
    /// `..., column`
    pub fn column(mut self, column: impl Into<PhoenixColumn>) -> Self {
        self.data_mut().columns.push(column.into());
        self
    }
}

impl<S: AcceptsConstraint> CreateTableStatement<S> {
    /// `... CONSTRAINT name PRIMARY KEY(...))`
    pub fn constraint(mut self, primary_key: PrimaryKeyConstraint) -> CreateTableStatement<Constrained> {
        self.data_mut().primary_key = Some(primary_key);
        self.transition()
    }
}

impl<S: AcceptsOptions> CreateTableStatement<S> {
    /// `... option`, such as `TTL=86400`; repeated options are joined
    /// with `", "`.
    pub fn option(mut self, option: &str) -> CreateTableStatement<WithOptions> {
        self.data_mut().options.push(Arc::from(option));
        self.transition()
    }
}

impl<S: AcceptsSplit> CreateTableStatement<S> {
    /// `... SPLIT ON(point, ...)`; points are literals or bind parameters.
    ///
    /// # Errors
    ///
    /// Returns [`sqlrail_core::BuildError::InsufficientOperands`] for an
    /// empty list.
    pub fn split_on<I>(mut self, points: I) -> Result<CreateTableStatement<Split>>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let points = collect_at_least("split points", 1, points.into_iter().map(IntoExpr::into_expr))?;
        tracing::debug!(table = %self.data.name, points = points.len(), "pre-splitting table");
        self.data_mut().split_points = points;
        Ok(self.transition())
    }
}

impl<S> SqlElement for CreateTableStatement<S> {
    fn render_into(&self, buf: &mut String) {
        self.data.render_into(buf);
    }
}

impl<S> Statement for CreateTableStatement<S> {}
