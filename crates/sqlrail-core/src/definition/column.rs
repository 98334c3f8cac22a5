//! Column definitions.
//!
//! ```text
//! name [type] [[CONSTRAINT name] constraint]...
//! ```
//!
//! A column starts from [`column`]. Once a type is given only constraints
//! may follow; constraints are accepted in any order, as SQLite does. Every
//! state that ends a constraint converts into [`ColumnDef`], and every such
//! state gets the constraint methods of [`ColumnConstraints`].
//!
//! ```rust
//! use sqlrail_core::definition::{column, ColumnConstraints};
//! use sqlrail_core::expr::{col, ExprTrait};
//! use sqlrail_core::render;
//! use sqlrail_core::types::DataType;
//!
//! let def = column("id")
//!     .typed(DataType::Integer)
//!     .primary_key()
//!     .desc()
//!     .on_conflict()
//!     .replace()
//!     .autoincrement()
//!     .check(col("id").gt(0));
//! assert_eq!(
//!     render(&def),
//!     "id INTEGER PRIMARY KEY DESC ON CONFLICT REPLACE AUTOINCREMENT CHECK (id > 0)"
//! );
//! ```

use std::marker::PhantomData;

use super::conflict::{render_conflict, ConflictResolution, ConflictTarget, OnConflict};
use super::foreign_key::{ForeignKey, ForeignKeyClause, ForeignKeyOwner, Referenced};
use super::indexed_column::IndexedColumn;
use crate::expr::{Direction, Expr, ExprNode, IntoExpr};
use crate::name::{Name, QualifiedName};
use crate::render::SqlElement;
use crate::types::DataType;

/// Starts a column definition (or an indexed column).
pub fn column(name: impl Into<Name>) -> ColumnName {
    ColumnName { name: name.into() }
}

/// A bare column name.
///
/// Becomes a [`ColumnDef`] through [`ColumnName::typed`] or any constraint
/// method, an [`IndexedColumn`] through `asc`/`desc`, and a column
/// reference when used as an expression.
#[derive(Debug, Clone)]
#[must_use]
pub struct ColumnName {
    name: Name,
}

impl ColumnName {
    /// The column name.
    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// `name type`
    pub fn typed(self, data_type: impl Into<DataType>) -> ColumnDef {
        ColumnDef {
            name: self.name,
            data_type: Some(data_type.into()),
            constraints: vec![],
        }
    }

    /// `name ASC`, as an indexed column.
    pub fn asc(self) -> IndexedColumn {
        IndexedColumn::from(self).asc()
    }

    /// `name DESC`, as an indexed column.
    pub fn desc(self) -> IndexedColumn {
        IndexedColumn::from(self).desc()
    }
}

impl IntoExpr for ColumnName {
    fn into_expr(self) -> Expr {
        Expr::primary(ExprNode::Column(QualifiedName::new(self.name)))
    }
}

/// A column definition inside `CREATE TABLE`.
#[derive(Debug, Clone)]
#[must_use]
pub struct ColumnDef {
    name: Name,
    data_type: Option<DataType>,
    constraints: Vec<ColumnConstraint>,
}

impl From<ColumnName> for ColumnDef {
    fn from(name: ColumnName) -> Self {
        Self {
            name: name.name,
            data_type: None,
            constraints: vec![],
        }
    }
}

impl SqlElement for ColumnDef {
    fn render_into(&self, buf: &mut String) {
        self.name.render_into(buf);
        if let Some(data_type) = &self.data_type {
            buf.push(' ');
            data_type.render_into(buf);
        }
        for constraint in &self.constraints {
            constraint.render_into(buf);
        }
    }
}

#[derive(Debug, Clone)]
struct ColumnConstraint {
    name: Option<Name>,
    kind: ConstraintKind,
}

#[derive(Debug, Clone)]
enum ConstraintKind {
    PrimaryKey {
        direction: Option<Direction>,
        conflict: Option<ConflictResolution>,
        autoincrement: bool,
    },
    NotNull(Option<ConflictResolution>),
    Unique(Option<ConflictResolution>),
    Check(Expr),
    Default(Expr),
    Collate(Name),
    References(ForeignKeyClause),
    Generated {
        always: bool,
        expr: Expr,
        storage: Option<Storage>,
    },
}

#[derive(Debug, Clone, Copy)]
enum Storage {
    Stored,
    Virtual,
}

impl SqlElement for ColumnConstraint {
    fn render_into(&self, buf: &mut String) {
        if let Some(name) = &self.name {
            buf.push_str(" CONSTRAINT ");
            name.render_into(buf);
        }
        match &self.kind {
            ConstraintKind::PrimaryKey {
                direction,
                conflict,
                autoincrement,
            } => {
                buf.push_str(" PRIMARY KEY");
                if let Some(direction) = direction {
                    buf.push(' ');
                    buf.push_str(direction.as_sql());
                }
                render_conflict(*conflict, buf);
                if *autoincrement {
                    buf.push_str(" AUTOINCREMENT");
                }
            }
            ConstraintKind::NotNull(conflict) => {
                buf.push_str(" NOT NULL");
                render_conflict(*conflict, buf);
            }
            ConstraintKind::Unique(conflict) => {
                buf.push_str(" UNIQUE");
                render_conflict(*conflict, buf);
            }
            ConstraintKind::Check(expr) => {
                buf.push_str(" CHECK (");
                expr.render_into(buf);
                buf.push(')');
            }
            ConstraintKind::Default(expr) => {
                buf.push_str(" DEFAULT ");
                if expr.is_literal() {
                    expr.render_into(buf);
                } else {
                    buf.push('(');
                    expr.render_into(buf);
                    buf.push(')');
                }
            }
            ConstraintKind::Collate(collation) => {
                buf.push_str(" COLLATE ");
                collation.render_into(buf);
            }
            ConstraintKind::References(clause) => clause.render_into(buf),
            ConstraintKind::Generated {
                always,
                expr,
                storage,
            } => {
                if *always {
                    buf.push_str(" GENERATED ALWAYS");
                }
                buf.push_str(" AS (");
                expr.render_into(buf);
                buf.push(')');
                match storage {
                    Some(Storage::Stored) => buf.push_str(" STORED"),
                    Some(Storage::Virtual) => buf.push_str(" VIRTUAL"),
                    None => {}
                }
            }
        }
    }
}

/// A column definition with the name of the constraint about to be added.
#[derive(Debug, Clone)]
struct Site {
    def: ColumnDef,
    name: Option<Name>,
}

impl Site {
    fn open(def: ColumnDef) -> Self {
        Self { def, name: None }
    }

    fn push(mut self, kind: ConstraintKind) -> ColumnDef {
        self.def.constraints.push(ColumnConstraint {
            name: self.name,
            kind,
        });
        self.def
    }

    fn primary_key(self) -> PrimaryKeyColumn<PkStart> {
        PrimaryKeyColumn {
            site: self,
            direction: None,
            conflict: None,
            _state: PhantomData,
        }
    }

    const fn not_null(self) -> ConflictableColumn {
        ConflictableColumn {
            site: self,
            unique: false,
        }
    }

    const fn unique(self) -> ConflictableColumn {
        ConflictableColumn {
            site: self,
            unique: true,
        }
    }

    fn check(self, condition: impl IntoExpr) -> ColumnDef {
        self.push(ConstraintKind::Check(condition.into_expr()))
    }

    fn default_value(self, value: impl IntoExpr) -> ColumnDef {
        self.push(ConstraintKind::Default(value.into_expr()))
    }

    fn collate(self, collation: impl Into<Name>) -> ColumnDef {
        self.push(ConstraintKind::Collate(collation.into()))
    }

    fn references(self, table: impl Into<Name>) -> ForeignKey<ColumnForeignKey, Referenced> {
        ForeignKey::new(ColumnForeignKey { site: self }, table.into())
    }

    const fn generated_always(self) -> GeneratedAlways {
        GeneratedAlways { site: self }
    }

    fn generated_as(self, expr: impl IntoExpr) -> GeneratedColumn {
        GeneratedColumn {
            site: self,
            always: false,
            expr: expr.into_expr(),
        }
    }
}

/// Column constraints, available on every state that converts into a
/// [`ColumnDef`].
pub trait ColumnConstraints: Into<ColumnDef> {
    /// `CONSTRAINT name`; a constraint kind must follow.
    fn constraint(self, name: impl Into<Name>) -> NamedColumnConstraint {
        NamedColumnConstraint {
            site: Site {
                def: self.into(),
                name: Some(name.into()),
            },
        }
    }

    /// `PRIMARY KEY`
    fn primary_key(self) -> PrimaryKeyColumn<PkStart> {
        Site::open(self.into()).primary_key()
    }

    /// `NOT NULL`
    fn not_null(self) -> ConflictableColumn {
        Site::open(self.into()).not_null()
    }

    /// `UNIQUE`
    fn unique(self) -> ConflictableColumn {
        Site::open(self.into()).unique()
    }

    /// `CHECK (condition)`
    fn check(self, condition: impl IntoExpr) -> ColumnDef {
        Site::open(self.into()).check(condition)
    }

    /// `DEFAULT value`; literals render bare, anything else in parentheses.
    fn default_value(self, value: impl IntoExpr) -> ColumnDef {
        Site::open(self.into()).default_value(value)
    }

    /// `COLLATE name`
    fn collate(self, collation: impl Into<Name>) -> ColumnDef {
        Site::open(self.into()).collate(collation)
    }

    /// `REFERENCES table ...`
    fn references(self, table: impl Into<Name>) -> ForeignKey<ColumnForeignKey, Referenced> {
        Site::open(self.into()).references(table)
    }

    /// `GENERATED ALWAYS`; the generating expression must follow.
    fn generated_always(self) -> GeneratedAlways {
        Site::open(self.into()).generated_always()
    }

    /// `AS (expr)`, a generated column without `GENERATED ALWAYS`.
    fn generated_as(self, expr: impl IntoExpr) -> GeneratedColumn {
        Site::open(self.into()).generated_as(expr)
    }
}

impl<T: Into<ColumnDef>> ColumnConstraints for T {}

/// `CONSTRAINT name`, waiting for the constraint kind.
#[derive(Debug, Clone)]
#[must_use]
pub struct NamedColumnConstraint {
    site: Site,
}

impl NamedColumnConstraint {
    /// `PRIMARY KEY`
    pub fn primary_key(self) -> PrimaryKeyColumn<PkStart> {
        self.site.primary_key()
    }

    /// `NOT NULL`
    pub fn not_null(self) -> ConflictableColumn {
        self.site.not_null()
    }

    /// `UNIQUE`
    pub fn unique(self) -> ConflictableColumn {
        self.site.unique()
    }

    /// `CHECK (condition)`
    pub fn check(self, condition: impl IntoExpr) -> ColumnDef {
        self.site.check(condition)
    }

    /// `DEFAULT value`
    pub fn default_value(self, value: impl IntoExpr) -> ColumnDef {
        self.site.default_value(value)
    }

    /// `COLLATE name`
    pub fn collate(self, collation: impl Into<Name>) -> ColumnDef {
        self.site.collate(collation)
    }

    /// `REFERENCES table ...`
    pub fn references(self, table: impl Into<Name>) -> ForeignKey<ColumnForeignKey, Referenced> {
        self.site.references(table)
    }

    /// `GENERATED ALWAYS`
    pub fn generated_always(self) -> GeneratedAlways {
        self.site.generated_always()
    }

    /// `AS (expr)`
    pub fn generated_as(self, expr: impl IntoExpr) -> GeneratedColumn {
        self.site.generated_as(expr)
    }
}

// ===================================================================
// PRIMARY KEY
// ===================================================================

/// Marker: `PRIMARY KEY` just written.
pub struct PkStart;
/// Marker: `ASC` or `DESC` written.
pub struct PkOrdered;
/// Marker: conflict clause written.
pub struct PkResolved;

/// States of a column `PRIMARY KEY` that still accept a conflict clause.
pub trait PkAcceptsConflict {}
impl PkAcceptsConflict for PkStart {}
impl PkAcceptsConflict for PkOrdered {}

/// `PRIMARY KEY [ASC|DESC] [conflict] [AUTOINCREMENT]`
#[must_use]
pub struct PrimaryKeyColumn<S> {
    site: Site,
    direction: Option<Direction>,
    conflict: Option<ConflictResolution>,
    _state: PhantomData<S>,
}

impl<S> Clone for PrimaryKeyColumn<S> {
    fn clone(&self) -> Self {
        Self {
            site: self.site.clone(),
            direction: self.direction,
            conflict: self.conflict,
            _state: PhantomData,
        }
    }
}

impl<S> PrimaryKeyColumn<S> {
    fn transition<T>(self) -> PrimaryKeyColumn<T> {
        PrimaryKeyColumn {
            site: self.site,
            direction: self.direction,
            conflict: self.conflict,
            _state: PhantomData,
        }
    }

    fn finish(self, autoincrement: bool) -> ColumnDef {
        self.site.push(ConstraintKind::PrimaryKey {
            direction: self.direction,
            conflict: self.conflict,
            autoincrement,
        })
    }

    /// `... AUTOINCREMENT`
    pub fn autoincrement(self) -> ColumnDef {
        self.finish(true)
    }
}

impl PrimaryKeyColumn<PkStart> {
    /// `PRIMARY KEY ASC`
    pub fn asc(mut self) -> PrimaryKeyColumn<PkOrdered> {
        self.direction = Some(Direction::Asc);
        self.transition()
    }

    /// `PRIMARY KEY DESC`
    pub fn desc(mut self) -> PrimaryKeyColumn<PkOrdered> {
        self.direction = Some(Direction::Desc);
        self.transition()
    }
}

impl<S: PkAcceptsConflict> PrimaryKeyColumn<S> {
    /// `... ON CONFLICT`
    pub const fn on_conflict(self) -> OnConflict<Self> {
        OnConflict::new(self)
    }
}

impl<S: PkAcceptsConflict> ConflictTarget for PrimaryKeyColumn<S> {
    type Output = PrimaryKeyColumn<PkResolved>;

    fn resolve(mut self, resolution: ConflictResolution) -> Self::Output {
        self.conflict = Some(resolution);
        self.transition()
    }
}

impl<S> From<PrimaryKeyColumn<S>> for ColumnDef {
    fn from(pk: PrimaryKeyColumn<S>) -> Self {
        pk.finish(false)
    }
}

// ===================================================================
// NOT NULL / UNIQUE
// ===================================================================

/// `NOT NULL` or `UNIQUE`, which may take a conflict clause.
#[derive(Debug, Clone)]
#[must_use]
pub struct ConflictableColumn {
    site: Site,
    unique: bool,
}

impl ConflictableColumn {
    fn finish(self, conflict: Option<ConflictResolution>) -> ColumnDef {
        let kind = if self.unique {
            ConstraintKind::Unique(conflict)
        } else {
            ConstraintKind::NotNull(conflict)
        };
        self.site.push(kind)
    }

    /// `... ON CONFLICT`
    pub const fn on_conflict(self) -> OnConflict<Self> {
        OnConflict::new(self)
    }
}

impl ConflictTarget for ConflictableColumn {
    type Output = ColumnDef;

    fn resolve(self, resolution: ConflictResolution) -> ColumnDef {
        self.finish(Some(resolution))
    }
}

impl From<ConflictableColumn> for ColumnDef {
    fn from(constraint: ConflictableColumn) -> Self {
        constraint.finish(None)
    }
}

// ===================================================================
// REFERENCES
// ===================================================================

/// Owner of a column-level foreign-key clause.
#[derive(Debug, Clone)]
pub struct ColumnForeignKey {
    site: Site,
}

impl ForeignKeyOwner for ColumnForeignKey {
    type Output = ColumnDef;

    fn attach(self, clause: ForeignKeyClause) -> ColumnDef {
        self.site.push(ConstraintKind::References(clause))
    }
}

impl<S> From<ForeignKey<ColumnForeignKey, S>> for ColumnDef {
    fn from(foreign_key: ForeignKey<ColumnForeignKey, S>) -> Self {
        foreign_key.finish()
    }
}

// ===================================================================
// Generated columns
// ===================================================================

/// `GENERATED ALWAYS`, waiting for `AS (expr)`.
#[derive(Debug, Clone)]
#[must_use]
pub struct GeneratedAlways {
    site: Site,
}

impl GeneratedAlways {
    /// `GENERATED ALWAYS AS (expr)`
    pub fn as_expr(self, expr: impl IntoExpr) -> GeneratedColumn {
        GeneratedColumn {
            site: self.site,
            always: true,
            expr: expr.into_expr(),
        }
    }
}

/// A generated column, optionally followed by `STORED` or `VIRTUAL`.
#[derive(Debug, Clone)]
#[must_use]
pub struct GeneratedColumn {
    site: Site,
    always: bool,
    expr: Expr,
}

impl GeneratedColumn {
    fn finish(self, storage: Option<Storage>) -> ColumnDef {
        self.site.push(ConstraintKind::Generated {
            always: self.always,
            expr: self.expr,
            storage,
        })
    }

    /// `... STORED`
    pub fn stored(self) -> ColumnDef {
        self.finish(Some(Storage::Stored))
    }

    /// `... VIRTUAL`
    pub fn virtual_(self) -> ColumnDef {
        self.finish(Some(Storage::Virtual))
    }
}

impl From<GeneratedColumn> for ColumnDef {
    fn from(generated: GeneratedColumn) -> Self {
        generated.finish(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ForeignKeyAction;
    use crate::expr::{col, current_timestamp, lit, ExprTrait};
    use crate::render::render;
    use crate::types::TypeName;

    fn sql(def: impl Into<ColumnDef>) -> String {
        render(&def.into())
    }

    #[test]
    fn test_name_and_type() {
        assert_eq!(sql(column("a")), "a");
        assert_eq!(sql(column("a").typed(DataType::Integer)), "a INTEGER");
        assert_eq!(
            sql(column("a").typed(TypeName::new("VARCHAR").with_size(12))),
            "a VARCHAR(12)"
        );
        assert_eq!(sql(column("select").typed(DataType::Text)), "select TEXT");
        assert_eq!(sql(column("my col").typed(DataType::Text)), "\"my col\" TEXT");
    }

    #[test]
    fn test_constraints_in_any_order() {
        let def = column("a")
            .typed(DataType::Text)
            .collate("NOCASE")
            .not_null()
            .unique()
            .default_value("x");
        assert_eq!(sql(def), "a TEXT COLLATE NOCASE NOT NULL UNIQUE DEFAULT 'x'");

        let def = column("a").typed(DataType::Text).default_value("x").not_null();
        assert_eq!(sql(def), "a TEXT DEFAULT 'x' NOT NULL");
    }

    #[test]
    fn test_primary_key_variants() {
        assert_eq!(
            sql(column("id").typed(DataType::Integer).primary_key()),
            "id INTEGER PRIMARY KEY"
        );
        assert_eq!(
            sql(column("id").typed(DataType::Integer).primary_key().autoincrement()),
            "id INTEGER PRIMARY KEY AUTOINCREMENT"
        );
        assert_eq!(
            sql(column("id").primary_key().asc().on_conflict().abort()),
            "id PRIMARY KEY ASC ON CONFLICT ABORT"
        );
        assert_eq!(
            sql(column("id").primary_key().on_conflict().ignore().not_null()),
            "id PRIMARY KEY ON CONFLICT IGNORE NOT NULL"
        );
        assert_eq!(
            sql(column("id").primary_key().desc().unique()),
            "id PRIMARY KEY DESC UNIQUE"
        );
    }

    #[test]
    fn test_conflict_clauses() {
        assert_eq!(
            sql(column("a").not_null().on_conflict().fail()),
            "a NOT NULL ON CONFLICT FAIL"
        );
        assert_eq!(
            sql(column("a").unique().on_conflict().rollback().check(col("a").gt(1))),
            "a UNIQUE ON CONFLICT ROLLBACK CHECK (a > 1)"
        );
    }

    #[test]
    fn test_default_values() {
        assert_eq!(sql(column("a").default_value(0)), "a DEFAULT 0");
        assert_eq!(sql(column("a").default_value(-1)), "a DEFAULT -1");
        assert_eq!(sql(column("a").default_value(lit(1.5))), "a DEFAULT 1.5");
        assert_eq!(
            sql(column("a").default_value(current_timestamp())),
            "a DEFAULT CURRENT_TIMESTAMP"
        );
        assert_eq!(sql(column("a").default_value(lit(1).add(2))), "a DEFAULT (1 + 2)");
        assert_eq!(
            sql(column("a").default_value(Option::<i32>::None)),
            "a DEFAULT NULL"
        );
    }

    #[test]
    fn test_named_constraints() {
        assert_eq!(
            sql(column("a").typed(DataType::Integer).constraint("pos").check(col("a").gt(0))),
            "a INTEGER CONSTRAINT pos CHECK (a > 0)"
        );
        assert_eq!(
            sql(column("a").constraint("nn").not_null().constraint("pk").primary_key()),
            "a CONSTRAINT nn NOT NULL CONSTRAINT pk PRIMARY KEY"
        );
    }

    #[test]
    fn test_references() {
        let def = column("owner")
            .typed(DataType::Integer)
            .references("users")
            .columns(["id"])
            .unwrap()
            .on_delete(ForeignKeyAction::Cascade)
            .not_null();
        assert_eq!(
            sql(def),
            "owner INTEGER REFERENCES users (id) ON DELETE CASCADE NOT NULL"
        );
        let def = column("owner").constraint("fk").references("users");
        assert_eq!(sql(def), "owner CONSTRAINT fk REFERENCES users");
    }

    #[test]
    fn test_generated_columns() {
        let def = column("c")
            .typed(DataType::Integer)
            .generated_always()
            .as_expr(col("a").mul(col("b")))
            .stored();
        assert_eq!(sql(def), "c INTEGER GENERATED ALWAYS AS (a * b) STORED");
        let def = column("c").generated_as(col("a").add(1)).virtual_();
        assert_eq!(sql(def), "c AS (a + 1) VIRTUAL");
        let def = column("c").generated_as(col("a")).not_null();
        assert_eq!(sql(def), "c AS (a) NOT NULL");
    }

    #[test]
    fn test_column_name_as_expression() {
        assert_eq!(column("a").into_expr().eq(1).to_string(), "a = 1");
    }
}
