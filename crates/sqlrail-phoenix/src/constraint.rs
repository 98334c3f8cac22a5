//! `CONSTRAINT name PRIMARY KEY(col [ASC|DESC] [ROW_TIMESTAMP], ...)`

use std::fmt;
use std::marker::PhantomData;

use sqlrail_core::error::{collect_at_least, Result};
use sqlrail_core::expr::Direction;
use sqlrail_core::name::Name;
use sqlrail_core::render::{render_comma_list, SqlElement};

/// `CONSTRAINT name`, waiting for `PRIMARY KEY`.
#[derive(Debug, Clone)]
#[must_use]
pub struct ConstraintName {
    name: Name,
}

/// `CONSTRAINT name`
pub fn constraint(name: impl Into<Name>) -> ConstraintName {
    ConstraintName { name: name.into() }
}

impl ConstraintName {
    /// `... PRIMARY KEY(col, ...)`
    ///
    /// # Errors
    ///
    /// Returns [`sqlrail_core::BuildError::InsufficientOperands`] for an
    /// empty column list.
    pub fn primary_key<I>(self, columns: I) -> Result<PrimaryKeyConstraint>
    where
        I: IntoIterator,
        I::Item: Into<KeyColumn>,
    {
        let columns = collect_at_least("primary key", 1, columns.into_iter().map(Into::into))?;
        Ok(PrimaryKeyConstraint {
            name: self.name,
            columns,
        })
    }
}

/// A named primary key constraint, placed after the last column.
#[derive(Debug, Clone)]
#[must_use]
pub struct PrimaryKeyConstraint {
    name: Name,
    columns: Vec<KeyColumn>,
}

impl SqlElement for PrimaryKeyConstraint {
    fn render_into(&self, buf: &mut String) {
        buf.push_str("CONSTRAINT ");
        self.name.render_into(buf);
        buf.push_str(" PRIMARY KEY(");
        render_comma_list(&self.columns, buf);
        buf.push(')');
    }
}

// ===================================================================
// Key columns
// ===================================================================

/// Marker: bare column name.
pub struct KeyNamed;
/// Marker: `ASC` or `DESC` written.
pub struct KeyDirected;

/// A primary key column in progress.
#[must_use]
pub struct KeyColumnBuilder<S> {
    column: KeyColumn,
    _state: PhantomData<S>,
}

impl<S> Clone for KeyColumnBuilder<S> {
    fn clone(&self) -> Self {
        Self {
            column: self.column.clone(),
            _state: PhantomData,
        }
    }
}

impl<S> fmt::Debug for KeyColumnBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeyColumnBuilder").field(&self.column).finish()
    }
}

/// `name`, a primary key column.
pub fn key_column(name: impl Into<Name>) -> KeyColumnBuilder<KeyNamed> {
    KeyColumnBuilder {
        column: KeyColumn::from(name.into()),
        _state: PhantomData,
    }
}

impl KeyColumnBuilder<KeyNamed> {
    fn directed(mut self, direction: Direction) -> KeyColumnBuilder<KeyDirected> {
        self.column.direction = Some(direction);
        KeyColumnBuilder {
            column: self.column,
            _state: PhantomData,
        }
    }

    /// `name ASC`
    pub fn asc(self) -> KeyColumnBuilder<KeyDirected> {
        self.directed(Direction::Asc)
    }

    /// `name DESC`
    pub fn desc(self) -> KeyColumnBuilder<KeyDirected> {
        self.directed(Direction::Desc)
    }
}

impl<S> KeyColumnBuilder<S> {
    /// `... ROW_TIMESTAMP`
    pub fn row_timestamp(mut self) -> KeyColumn {
        self.column.row_timestamp = true;
        self.column
    }
}

/// A finished primary key column.
#[derive(Debug, Clone)]
#[must_use]
pub struct KeyColumn {
    name: Name,
    direction: Option<Direction>,
    row_timestamp: bool,
}

impl SqlElement for KeyColumn {
    fn render_into(&self, buf: &mut String) {
        self.name.render_into(buf);
        if let Some(direction) = self.direction {
            buf.push(' ');
            buf.push_str(direction.as_sql());
        }
        if self.row_timestamp {
            buf.push_str(" ROW_TIMESTAMP");
        }
    }
}

impl<S> From<KeyColumnBuilder<S>> for KeyColumn {
    fn from(builder: KeyColumnBuilder<S>) -> Self {
        builder.column
    }
}

impl From<Name> for KeyColumn {
    fn from(name: Name) -> Self {
        Self {
            name,
            direction: None,
            row_timestamp: false,
        }
    }
}

impl From<&str> for KeyColumn {
    fn from(name: &str) -> Self {
        Self::from(Name::new(name))
    }
}
