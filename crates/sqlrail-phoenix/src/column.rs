//! Phoenix column definitions.
//!
//! ```text
//! ref type [NULL | NOT NULL] [DEFAULT value] [PRIMARY KEY [ASC | DESC] [ROW_TIMESTAMP]]
//! ```
//!
//! Unlike SQLite, Phoenix fixes the order of the column clauses, so each
//! clause moves the definition to a state from which only later clauses
//! are reachable.
//!
//! ```compile_fail
//! use sqlrail_core::types::DataType;
//! use sqlrail_phoenix::column;
//!
//! // DEFAULT cannot come after PRIMARY KEY.
//! let _ = column("id").typed(DataType::Integer).primary_key().default_value(0);
//! ```

use std::fmt;
use std::marker::PhantomData;

use sqlrail_core::expr::{Direction, Expr, IntoExpr};
use sqlrail_core::name::{Name, QualifiedName};
use sqlrail_core::render::{render, SqlElement};

use crate::types::PhoenixType;

/// A column reference, optionally prefixed by its column family.
#[derive(Debug, Clone)]
#[must_use]
pub struct ColumnRef {
    name: QualifiedName,
}

/// `name`
pub fn column(name: impl Into<Name>) -> ColumnRef {
    ColumnRef {
        name: QualifiedName::new(name),
    }
}

/// `family.name`
pub fn family_column(family: impl Into<Name>, name: impl Into<Name>) -> ColumnRef {
    ColumnRef {
        name: QualifiedName::qualified(family, name),
    }
}

impl ColumnRef {
    /// The referenced name.
    #[must_use]
    pub const fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// `ref type`
    pub fn typed(self, data_type: impl Into<PhoenixType>) -> ColumnDef<Typed> {
        ColumnDef {
            spec: PhoenixColumn {
                name: self.name,
                data_type: data_type.into(),
                nullable: None,
                default: None,
                primary_key: None,
            },
            _state: PhantomData,
        }
    }
}

#[derive(Debug, Clone)]
struct InlinePrimaryKey {
    direction: Option<Direction>,
    row_timestamp: bool,
}

/// A finished column definition with its typestate erased.
#[derive(Debug, Clone)]
pub struct PhoenixColumn {
    name: QualifiedName,
    data_type: PhoenixType,
    nullable: Option<bool>,
    default: Option<Expr>,
    primary_key: Option<InlinePrimaryKey>,
}

impl PhoenixColumn {
    /// The column reference.
    #[must_use]
    pub const fn name(&self) -> &QualifiedName {
        &self.name
    }

    /// Whether the column is declared `PRIMARY KEY` inline.
    #[must_use]
    pub const fn is_primary_key(&self) -> bool {
        self.primary_key.is_some()
    }
}

impl SqlElement for PhoenixColumn {
    fn render_into(&self, buf: &mut String) {
        self.name.render_into(buf);
        buf.push(' ');
        self.data_type.render_into(buf);
        match self.nullable {
            Some(true) => buf.push_str(" NULL"),
            Some(false) => buf.push_str(" NOT NULL"),
            None => {}
        }
        if let Some(default) = &self.default {
            buf.push_str(" DEFAULT ");
            default.render_into(buf);
        }
        if let Some(pk) = &self.primary_key {
            buf.push_str(" PRIMARY KEY");
            if let Some(direction) = pk.direction {
                buf.push(' ');
                buf.push_str(direction.as_sql());
            }
            if pk.row_timestamp {
                buf.push_str(" ROW_TIMESTAMP");
            }
        }
    }
}

impl fmt::Display for PhoenixColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

// Typestate markers

/// Marker: type written.
pub struct Typed;
/// Marker: `NULL` or `NOT NULL` written.
pub struct Nullability;
/// Marker: `DEFAULT` written.
pub struct Defaulted;
/// Marker: `PRIMARY KEY` written.
pub struct InlineKey;
/// Marker: `ASC` or `DESC` written.
pub struct KeyOrdered;
/// Marker: `ROW_TIMESTAMP` written; nothing may follow.
pub struct Timestamped;

/// States that accept `DEFAULT`.
pub trait AcceptsDefault {}
impl AcceptsDefault for Typed {}
impl AcceptsDefault for Nullability {}

/// States that accept `PRIMARY KEY`.
pub trait AcceptsPrimaryKey {}
impl<S: AcceptsDefault> AcceptsPrimaryKey for S {}
impl AcceptsPrimaryKey for Defaulted {}

/// States that accept `ROW_TIMESTAMP`.
pub trait AcceptsRowTimestamp {}
impl AcceptsRowTimestamp for InlineKey {}
impl AcceptsRowTimestamp for KeyOrdered {}

/// A column definition in progress; every state is a complete definition.
#[must_use]
pub struct ColumnDef<S> {
    spec: PhoenixColumn,
    _state: PhantomData<S>,
}

impl<S> Clone for ColumnDef<S> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
            _state: PhantomData,
        }
    }
}

impl<S> fmt::Debug for ColumnDef<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("sql", &render(&self.spec))
            .finish()
    }
}

impl<S> ColumnDef<S> {
    fn transition<T>(self) -> ColumnDef<T> {
        ColumnDef {
            spec: self.spec,
            _state: PhantomData,
        }
    }

    fn key_mut(&mut self) -> Option<&mut InlinePrimaryKey> {
        self.spec.primary_key.as_mut()
    }
}

impl ColumnDef<Typed> {
    /// `... NULL`
    pub fn null(mut self) -> ColumnDef<Nullability> {
        self.spec.nullable = Some(true);
        self.transition()
    }

    /// `... NOT NULL`
    pub fn not_null(mut self) -> ColumnDef<Nullability> {
        self.spec.nullable = Some(false);
        self.transition()
    }
}

impl<S: AcceptsDefault> ColumnDef<S> {
    /// `... DEFAULT value`
    pub fn default_value(mut self, value: impl IntoExpr) -> ColumnDef<Defaulted> {
        self.spec.default = Some(value.into_expr());
        self.transition()
    }
}

impl<S: AcceptsPrimaryKey> ColumnDef<S> {
    /// `... PRIMARY KEY`
    pub fn primary_key(mut self) -> ColumnDef<InlineKey> {
        self.spec.primary_key = Some(InlinePrimaryKey {
            direction: None,
            row_timestamp: false,
        });
        self.transition()
    }
}

impl ColumnDef<InlineKey> {
    fn ordered(mut self, direction: Direction) -> ColumnDef<KeyOrdered> {
        if let Some(pk) = self.key_mut() {
            pk.direction = Some(direction);
        }
        self.transition()
    }

    /// `... PRIMARY KEY ASC`
    pub fn asc(self) -> ColumnDef<KeyOrdered> {
        self.ordered(Direction::Asc)
    }

    /// `... PRIMARY KEY DESC`
    pub fn desc(self) -> ColumnDef<KeyOrdered> {
        self.ordered(Direction::Desc)
    }
}

impl<S: AcceptsRowTimestamp> ColumnDef<S> {
    /// `... ROW_TIMESTAMP`
    pub fn row_timestamp(mut self) -> ColumnDef<Timestamped> {
        if let Some(pk) = self.key_mut() {
            pk.row_timestamp = true;
        }
        self.transition()
    }
}

impl<S> SqlElement for ColumnDef<S> {
    fn render_into(&self, buf: &mut String) {
        self.spec.render_into(buf);
    }
}

impl<S> From<ColumnDef<S>> for PhoenixColumn {
    fn from(def: ColumnDef<S>) -> Self {
        def.spec
    }
}
