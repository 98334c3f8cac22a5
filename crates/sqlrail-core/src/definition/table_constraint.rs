//! Table-level constraints, rendered after the column list of
//! `CREATE TABLE`.

use super::conflict::{render_conflict, ConflictResolution, ConflictTarget, OnConflict};
use super::foreign_key::{ForeignKey, ForeignKeyClause, ForeignKeyOwner, Referenced};
use super::indexed_column::IndexedColumn;
use crate::error::{collect_at_least, Result};
use crate::expr::{Expr, IntoExpr};
use crate::name::Name;
use crate::render::{render_comma_list, render_paren_list, SqlElement};

/// One entry after the columns of `CREATE TABLE`.
#[derive(Debug, Clone)]
#[must_use]
pub struct TableConstraint {
    name: Option<Name>,
    kind: TableConstraintKind,
}

#[derive(Debug, Clone)]
enum TableConstraintKind {
    PrimaryKey {
        columns: Vec<IndexedColumn>,
        autoincrement: bool,
        conflict: Option<ConflictResolution>,
    },
    Unique {
        columns: Vec<IndexedColumn>,
        conflict: Option<ConflictResolution>,
    },
    Check(Expr),
    ForeignKey {
        columns: Vec<Name>,
        clause: ForeignKeyClause,
    },
}

impl SqlElement for TableConstraint {
    fn render_into(&self, buf: &mut String) {
        if let Some(name) = &self.name {
            buf.push_str("CONSTRAINT ");
            name.render_into(buf);
            buf.push(' ');
        }
        match &self.kind {
            TableConstraintKind::PrimaryKey {
                columns,
                autoincrement,
                conflict,
            } => {
                buf.push_str("PRIMARY KEY (");
                render_comma_list(columns, buf);
                if *autoincrement {
                    buf.push_str(" AUTOINCREMENT");
                }
                buf.push(')');
                render_conflict(*conflict, buf);
            }
            TableConstraintKind::Unique { columns, conflict } => {
                buf.push_str("UNIQUE");
                render_paren_list(columns, buf);
                render_conflict(*conflict, buf);
            }
            TableConstraintKind::Check(expr) => {
                buf.push_str("CHECK (");
                expr.render_into(buf);
                buf.push(')');
            }
            TableConstraintKind::ForeignKey { columns, clause } => {
                buf.push_str("FOREIGN KEY");
                render_paren_list(columns, buf);
                clause.render_into(buf);
            }
        }
    }
}

/// `CONSTRAINT name`, waiting for the constraint kind.
///
/// ```rust
/// use sqlrail_core::definition::constraint;
/// use sqlrail_core::render;
///
/// let pk = constraint("pk").primary_key(["a", "b"]).unwrap();
/// assert_eq!(render(&pk), "CONSTRAINT pk PRIMARY KEY (a, b)");
/// ```
pub fn constraint(name: impl Into<Name>) -> NamedTableConstraint {
    NamedTableConstraint {
        name: Some(name.into()),
    }
}

/// `PRIMARY KEY (col, ...)`
///
/// # Errors
///
/// Returns [`crate::BuildError::InsufficientOperands`] for an empty list.
pub fn primary_key<I>(columns: I) -> Result<KeyConstraint>
where
    I: IntoIterator,
    I::Item: Into<IndexedColumn>,
{
    NamedTableConstraint { name: None }.primary_key(columns)
}

/// `PRIMARY KEY (col AUTOINCREMENT)`
pub fn primary_key_autoincrement(column: impl Into<IndexedColumn>) -> KeyConstraint {
    NamedTableConstraint { name: None }.primary_key_autoincrement(column)
}

/// `UNIQUE (col, ...)`
///
/// # Errors
///
/// Returns [`crate::BuildError::InsufficientOperands`] for an empty list.
pub fn unique<I>(columns: I) -> Result<KeyConstraint>
where
    I: IntoIterator,
    I::Item: Into<IndexedColumn>,
{
    NamedTableConstraint { name: None }.unique(columns)
}

/// `CHECK (condition)`
pub fn check(condition: impl IntoExpr) -> TableConstraint {
    NamedTableConstraint { name: None }.check(condition)
}

/// `FOREIGN KEY (col, ...)`, waiting for `REFERENCES`.
///
/// # Errors
///
/// Returns [`crate::BuildError::InsufficientOperands`] for an empty list.
pub fn foreign_key<I>(columns: I) -> Result<ForeignKeyColumns>
where
    I: IntoIterator,
    I::Item: Into<Name>,
{
    NamedTableConstraint { name: None }.foreign_key(columns)
}

/// A table constraint that has been given (or deliberately not given) a
/// name.
#[derive(Debug, Clone)]
#[must_use]
pub struct NamedTableConstraint {
    name: Option<Name>,
}

impl NamedTableConstraint {
    fn key(
        self,
        construct: &'static str,
        columns: impl IntoIterator<Item = IndexedColumn>,
        unique: bool,
    ) -> Result<KeyConstraint> {
        Ok(KeyConstraint {
            name: self.name,
            columns: collect_at_least(construct, 1, columns)?,
            unique,
            autoincrement: false,
        })
    }

    /// `... PRIMARY KEY (col, ...)`
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::InsufficientOperands`] for an empty
    /// list.
    pub fn primary_key<I>(self, columns: I) -> Result<KeyConstraint>
    where
        I: IntoIterator,
        I::Item: Into<IndexedColumn>,
    {
        self.key("primary key", columns.into_iter().map(Into::into), false)
    }

    /// `... PRIMARY KEY (col AUTOINCREMENT)`
    pub fn primary_key_autoincrement(self, column: impl Into<IndexedColumn>) -> KeyConstraint {
        KeyConstraint {
            name: self.name,
            columns: vec![column.into()],
            unique: false,
            autoincrement: true,
        }
    }

    /// `... UNIQUE (col, ...)`
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::InsufficientOperands`] for an empty
    /// list.
    pub fn unique<I>(self, columns: I) -> Result<KeyConstraint>
    where
        I: IntoIterator,
        I::Item: Into<IndexedColumn>,
    {
        self.key("unique constraint", columns.into_iter().map(Into::into), true)
    }

    /// `... CHECK (condition)`
    pub fn check(self, condition: impl IntoExpr) -> TableConstraint {
        TableConstraint {
            name: self.name,
            kind: TableConstraintKind::Check(condition.into_expr()),
        }
    }

    /// `... FOREIGN KEY (col, ...)`
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::InsufficientOperands`] for an empty
    /// list.
    pub fn foreign_key<I>(self, columns: I) -> Result<ForeignKeyColumns>
    where
        I: IntoIterator,
        I::Item: Into<Name>,
    {
        Ok(ForeignKeyColumns {
            name: self.name,
            columns: collect_at_least(
                "foreign key",
                1,
                columns.into_iter().map(Into::into),
            )?,
        })
    }
}

/// `PRIMARY KEY (...)` or `UNIQUE (...)`, which may take a conflict clause.
#[derive(Debug, Clone)]
#[must_use]
pub struct KeyConstraint {
    name: Option<Name>,
    columns: Vec<IndexedColumn>,
    unique: bool,
    autoincrement: bool,
}

impl KeyConstraint {
    fn finish(self, conflict: Option<ConflictResolution>) -> TableConstraint {
        let kind = if self.unique {
            TableConstraintKind::Unique {
                columns: self.columns,
                conflict,
            }
        } else {
            TableConstraintKind::PrimaryKey {
                columns: self.columns,
                autoincrement: self.autoincrement,
                conflict,
            }
        };
        TableConstraint {
            name: self.name,
            kind,
        }
    }

    /// `... ON CONFLICT`
    pub const fn on_conflict(self) -> OnConflict<Self> {
        OnConflict::new(self)
    }
}

impl ConflictTarget for KeyConstraint {
    type Output = TableConstraint;

    fn resolve(self, resolution: ConflictResolution) -> TableConstraint {
        self.finish(Some(resolution))
    }
}

impl From<KeyConstraint> for TableConstraint {
    fn from(key: KeyConstraint) -> Self {
        key.finish(None)
    }
}

impl SqlElement for KeyConstraint {
    fn render_into(&self, buf: &mut String) {
        self.clone().finish(None).render_into(buf);
    }
}

/// `FOREIGN KEY (col, ...)`, waiting for `REFERENCES`.
#[derive(Debug, Clone)]
#[must_use]
pub struct ForeignKeyColumns {
    name: Option<Name>,
    columns: Vec<Name>,
}

impl ForeignKeyColumns {
    /// `... REFERENCES table`
    pub fn references(self, table: impl Into<Name>) -> ForeignKey<TableForeignKey, Referenced> {
        ForeignKey::new(TableForeignKey { inner: self }, table.into())
    }
}

/// Owner of a table-level foreign-key clause.
#[derive(Debug, Clone)]
pub struct TableForeignKey {
    inner: ForeignKeyColumns,
}

impl ForeignKeyOwner for TableForeignKey {
    type Output = TableConstraint;

    fn attach(self, clause: ForeignKeyClause) -> TableConstraint {
        TableConstraint {
            name: self.inner.name,
            kind: TableConstraintKind::ForeignKey {
                columns: self.inner.columns,
                clause,
            },
        }
    }
}

impl<S> From<ForeignKey<TableForeignKey, S>> for TableConstraint {
    fn from(foreign_key: ForeignKey<TableForeignKey, S>) -> Self {
        foreign_key.finish()
    }
}
