//! SELECT statement builder using the typestate pattern.
//!
//! ```text
//! SELECT [/*+ hint */] [DISTINCT | ALL] projection
//!     [FROM table-spec [WHERE expr] [GROUP BY expr, ... [HAVING expr]]]
//!     [UNION ALL select-core]...
//!     [ORDER BY term, ...]
//!     [LIMIT n [OFFSET n [ROW | ROWS]] [FETCH NEXT | FIRST n ROW | ROWS ONLY]]
//! ```
//!
//! Invalid clause orderings are caught at compile time:
//!
//! ```compile_fail
//! use sqlrail_core::builder::Select;
//! use sqlrail_core::expr::{col, ExprTrait};
//!
//! // WHERE needs a FROM clause first.
//! let _ = Select.column(col("a")).where_clause(col("a").eq(1));
//! ```
//!
//! ```compile_fail
//! use sqlrail_core::builder::{table, Select};
//! use sqlrail_core::expr::col;
//! use sqlrail_core::Statement;
//!
//! // FETCH without ROW ONLY / ROWS ONLY is incomplete.
//! let _ = Select.column(col("a")).from(table("t")).limit(1).fetch_next(5).to_sql();
//! ```
//!
//! ```compile_fail
//! use sqlrail_core::builder::{table, Select};
//! use sqlrail_core::expr::{col, ExprTrait};
//!
//! // HAVING needs GROUP BY.
//! let _ = Select.column(col("a")).from(table("t")).having(col("a").gt(1));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::Param;
use crate::error::{collect_at_least, Result};
use crate::expr::{Expr, IntoExpr, OrderingTerm};
use crate::name::{Name, QualifiedName};
use crate::render::{render_comma_list, SqlElement, Statement};

// ===================================================================
// Projection
// ===================================================================

#[derive(Debug, Clone)]
enum Projection {
    Expr { expr: Expr, alias: Option<Alias> },
    Star,
    StarOf(Name),
}

#[derive(Debug, Clone)]
struct Alias {
    name: Name,
    explicit: bool,
}

impl SqlElement for Alias {
    fn render_into(&self, buf: &mut String) {
        buf.push_str(if self.explicit { " AS " } else { " " });
        self.name.render_into(buf);
    }
}

/// One item of the projection list.
///
/// Any expression converts into a result column; aliases come from
/// [`ExprTrait::alias`](crate::expr::ExprTrait::alias) and
/// [`ExprTrait::alias_implicit`](crate::expr::ExprTrait::alias_implicit).
#[derive(Debug, Clone)]
#[must_use]
pub struct ResultColumn(Projection);

impl ResultColumn {
    pub(crate) fn aliased(expr: Expr, name: Name, explicit: bool) -> Self {
        Self(Projection::Expr {
            expr,
            alias: Some(Alias { name, explicit }),
        })
    }
}

/// `*`
pub fn star() -> ResultColumn {
    ResultColumn(Projection::Star)
}

/// `table.*`
pub fn star_of(table: impl Into<Name>) -> ResultColumn {
    ResultColumn(Projection::StarOf(table.into()))
}

impl<E: IntoExpr> From<E> for ResultColumn {
    fn from(expr: E) -> Self {
        Self(Projection::Expr {
            expr: expr.into_expr(),
            alias: None,
        })
    }
}

impl SqlElement for ResultColumn {
    fn render_into(&self, buf: &mut String) {
        match &self.0 {
            Projection::Expr { expr, alias } => {
                expr.render_into(buf);
                if let Some(alias) = alias {
                    alias.render_into(buf);
                }
            }
            Projection::Star => buf.push('*'),
            Projection::StarOf(table) => {
                table.render_into(buf);
                buf.push_str(".*");
            }
        }
    }
}

// ===================================================================
// Table specification
// ===================================================================

#[derive(Debug, Clone)]
enum Source {
    Table(QualifiedName),
    Subquery(SelectQuery),
}

/// Dialect syntax written after a table item and its alias, such as
/// Phoenix's `TABLESAMPLE(0.1)`.
///
/// The suffix renders its own leading separator.
pub trait TableSuffix: SqlElement + fmt::Debug + Send + Sync {}

impl<T: SqlElement + fmt::Debug + Send + Sync> TableSuffix for T {}

/// A table or parenthesized sub-select in `FROM`, with an optional alias.
#[derive(Debug, Clone)]
#[must_use]
pub struct TableItem {
    source: Source,
    alias: Option<Alias>,
    suffixes: Vec<Arc<dyn TableSuffix>>,
}

impl TableItem {
    const fn new(source: Source) -> Self {
        Self {
            source,
            alias: None,
            suffixes: Vec::new(),
        }
    }

    /// `... AS alias`
    pub fn alias(self, alias: impl Into<Name>) -> Self {
        Self {
            alias: Some(Alias {
                name: alias.into(),
                explicit: true,
            }),
            ..self
        }
    }

    /// `... alias`
    pub fn alias_implicit(self, alias: impl Into<Name>) -> Self {
        Self {
            alias: Some(Alias {
                name: alias.into(),
                explicit: false,
            }),
            ..self
        }
    }

    /// Appends dialect syntax after the alias.
    pub fn suffix(mut self, suffix: impl TableSuffix + 'static) -> Self {
        self.suffixes.push(Arc::new(suffix));
        self
    }
}

/// A table reference, optionally schema-qualified.
pub fn table(name: impl Into<QualifiedName>) -> TableItem {
    TableItem::new(Source::Table(name.into()))
}

/// A parenthesized sub-select used as a table.
pub fn subquery_table(query: impl Into<SelectQuery>) -> TableItem {
    TableItem::new(Source::Subquery(query.into()))
}

impl From<&str> for TableItem {
    fn from(name: &str) -> Self {
        table(name)
    }
}

impl From<QualifiedName> for TableItem {
    fn from(name: QualifiedName) -> Self {
        table(name)
    }
}

impl SqlElement for TableItem {
    fn render_into(&self, buf: &mut String) {
        match &self.source {
            Source::Table(name) => name.render_into(buf),
            Source::Subquery(query) => {
                buf.push('(');
                query.render_into(buf);
                buf.push(')');
            }
        }
        if let Some(alias) = &self.alias {
            alias.render_into(buf);
        }
        for suffix in &self.suffixes {
            suffix.render_into(buf);
        }
    }
}

#[derive(Debug, Clone)]
struct Join {
    operator: &'static str,
    item: TableItem,
    on: Expr,
}

/// The `FROM` clause: one table item followed by joins.
#[derive(Debug, Clone)]
#[must_use]
pub struct TableSpec {
    first: TableItem,
    joins: Vec<Join>,
}

impl From<TableItem> for TableSpec {
    fn from(first: TableItem) -> Self {
        Self {
            first,
            joins: vec![],
        }
    }
}

impl From<&str> for TableSpec {
    fn from(name: &str) -> Self {
        table(name).into()
    }
}

impl SqlElement for TableSpec {
    fn render_into(&self, buf: &mut String) {
        self.first.render_into(buf);
        for join in &self.joins {
            buf.push(' ');
            buf.push_str(join.operator);
            buf.push(' ');
            join.item.render_into(buf);
            buf.push_str(" ON ");
            join.on.render_into(buf);
        }
    }
}

/// Joins, available on anything that converts into a [`TableSpec`].
pub trait JoinExt: Into<TableSpec> {
    /// `... JOIN item ON condition`
    fn join(self, item: impl Into<TableItem>, on: impl IntoExpr) -> TableSpec {
        push_join(self.into(), "JOIN", item.into(), on.into_expr())
    }

    /// `... INNER JOIN item ON condition`
    fn inner_join(self, item: impl Into<TableItem>, on: impl IntoExpr) -> TableSpec {
        push_join(self.into(), "INNER JOIN", item.into(), on.into_expr())
    }

    /// `... LEFT JOIN item ON condition`
    fn left_join(self, item: impl Into<TableItem>, on: impl IntoExpr) -> TableSpec {
        push_join(self.into(), "LEFT JOIN", item.into(), on.into_expr())
    }

    /// `... LEFT OUTER JOIN item ON condition`
    fn left_outer_join(self, item: impl Into<TableItem>, on: impl IntoExpr) -> TableSpec {
        push_join(self.into(), "LEFT OUTER JOIN", item.into(), on.into_expr())
    }

    /// `... RIGHT JOIN item ON condition`
    fn right_join(self, item: impl Into<TableItem>, on: impl IntoExpr) -> TableSpec {
        push_join(self.into(), "RIGHT JOIN", item.into(), on.into_expr())
    }

    /// `... RIGHT OUTER JOIN item ON condition`
    fn right_outer_join(self, item: impl Into<TableItem>, on: impl IntoExpr) -> TableSpec {
        push_join(self.into(), "RIGHT OUTER JOIN", item.into(), on.into_expr())
    }
}

impl<T: Into<TableSpec>> JoinExt for T {}

fn push_join(mut spec: TableSpec, operator: &'static str, item: TableItem, on: Expr) -> TableSpec {
    spec.joins.push(Join { operator, item, on });
    spec
}

// ===================================================================
// Statement data
// ===================================================================

#[derive(Debug, Clone)]
struct SelectCore {
    hint: Option<Arc<str>>,
    quantifier: Option<&'static str>,
    columns: Vec<ResultColumn>,
    from: Option<TableSpec>,
    where_clause: Option<Expr>,
    group_by: Vec<Expr>,
    having: Option<Expr>,
}

impl SqlElement for SelectCore {
    fn render_into(&self, buf: &mut String) {
        buf.push_str("SELECT");
        if let Some(hint) = &self.hint {
            buf.push_str(" /*+ ");
            buf.push_str(hint);
            buf.push_str(" */");
        }
        if let Some(quantifier) = self.quantifier {
            buf.push(' ');
            buf.push_str(quantifier);
        }
        buf.push(' ');
        render_comma_list(&self.columns, buf);
        if let Some(from) = &self.from {
            buf.push_str(" FROM ");
            from.render_into(buf);
        }
        if let Some(condition) = &self.where_clause {
            buf.push_str(" WHERE ");
            condition.render_into(buf);
        }
        if !self.group_by.is_empty() {
            buf.push_str(" GROUP BY ");
            render_comma_list(&self.group_by, buf);
        }
        if let Some(condition) = &self.having {
            buf.push_str(" HAVING ");
            condition.render_into(buf);
        }
    }
}

#[derive(Debug, Clone)]
struct Fetch {
    first: bool,
    count: Param,
    plural: bool,
}

#[derive(Debug, Clone)]
struct SelectData {
    cores: Vec<SelectCore>,
    order_by: Vec<OrderingTerm>,
    limit: Option<Param>,
    offset: Option<Param>,
    offset_unit: Option<&'static str>,
    fetch: Option<Fetch>,
}

impl SelectData {
    /// The core that clause methods extend; only reachable before
    /// `UNION ALL`, where it is the sole core.
    fn core_mut(&mut self) -> Option<&mut SelectCore> {
        self.cores.last_mut()
    }
}

impl SqlElement for SelectData {
    fn render_into(&self, buf: &mut String) {
        for (i, core) in self.cores.iter().enumerate() {
            if i > 0 {
                buf.push_str(" UNION ALL ");
            }
            core.render_into(buf);
        }
        if !self.order_by.is_empty() {
            buf.push_str(" ORDER BY ");
            render_comma_list(&self.order_by, buf);
        }
        if let Some(limit) = &self.limit {
            buf.push_str(" LIMIT ");
            limit.render_into(buf);
        }
        if let Some(offset) = &self.offset {
            buf.push_str(" OFFSET ");
            offset.render_into(buf);
            if let Some(unit) = self.offset_unit {
                buf.push(' ');
                buf.push_str(unit);
            }
        }
        if let Some(fetch) = &self.fetch {
            buf.push_str(if fetch.first { " FETCH FIRST " } else { " FETCH NEXT " });
            fetch.count.render_into(buf);
            buf.push_str(if fetch.plural { " ROWS ONLY" } else { " ROW ONLY" });
        }
    }
}

// ===================================================================
// Entry points
// ===================================================================

/// The `SELECT` keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct Select;

impl Select {
    fn head(self) -> SelectHead {
        SelectHead {
            hint: None,
            quantifier: None,
        }
    }

    /// `SELECT /*+ hint */`; the hint text is opaque.
    pub fn hint(self, hint: &str) -> SelectHead {
        SelectHead {
            hint: Some(Arc::from(hint.replace("*/", "* /"))),
            quantifier: None,
        }
    }

    /// `SELECT DISTINCT`
    pub fn distinct(self) -> SelectModifier {
        self.head().distinct()
    }

    /// `SELECT ALL`
    pub fn all(self) -> SelectModifier {
        self.head().all()
    }

    /// `SELECT item`
    pub fn column(self, item: impl Into<ResultColumn>) -> SelectStatement<Projected> {
        self.head().column(item)
    }

    /// `SELECT item, ...`
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::InsufficientOperands`] for an empty
    /// projection.
    pub fn columns<I>(self, items: I) -> Result<SelectStatement<Projected>>
    where
        I: IntoIterator,
        I::Item: Into<ResultColumn>,
    {
        self.head().columns(items)
    }

    /// `SELECT *`
    pub fn star(self) -> SelectStatement<Projected> {
        self.head().star()
    }
}

/// `SELECT /*+ hint */`, before the projection.
#[derive(Debug, Clone)]
#[must_use]
pub struct SelectHead {
    hint: Option<Arc<str>>,
    quantifier: Option<&'static str>,
}

impl SelectHead {
    /// `... DISTINCT`
    pub fn distinct(self) -> SelectModifier {
        SelectModifier(Self {
            quantifier: Some("DISTINCT"),
            ..self
        })
    }

    /// `... ALL`
    pub fn all(self) -> SelectModifier {
        SelectModifier(Self {
            quantifier: Some("ALL"),
            ..self
        })
    }

    fn project(self, columns: Vec<ResultColumn>) -> SelectStatement<Projected> {
        SelectStatement {
            data: SelectData {
                cores: vec![SelectCore {
                    hint: self.hint,
                    quantifier: self.quantifier,
                    columns,
                    from: None,
                    where_clause: None,
                    group_by: vec![],
                    having: None,
                }],
                order_by: vec![],
                limit: None,
                offset: None,
                offset_unit: None,
                fetch: None,
            },
            _state: PhantomData,
        }
    }

    /// `... item`
    pub fn column(self, item: impl Into<ResultColumn>) -> SelectStatement<Projected> {
        self.project(vec![item.into()])
    }

    /// `... item, ...`
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::InsufficientOperands`] for an empty
    /// projection.
    pub fn columns<I>(self, items: I) -> Result<SelectStatement<Projected>>
    where
        I: IntoIterator,
        I::Item: Into<ResultColumn>,
    {
        let columns = collect_at_least("projection", 1, items.into_iter().map(Into::into))?;
        Ok(self.project(columns))
    }

    /// `... *`
    pub fn star(self) -> SelectStatement<Projected> {
        self.project(vec![star()])
    }
}

/// `SELECT [hint] DISTINCT|ALL`, before the projection.
#[derive(Debug, Clone)]
#[must_use]
pub struct SelectModifier(SelectHead);

impl SelectModifier {
    /// `... item`
    pub fn column(self, item: impl Into<ResultColumn>) -> SelectStatement<Projected> {
        self.0.column(item)
    }

    /// `... item, ...`
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::InsufficientOperands`] for an empty
    /// projection.
    pub fn columns<I>(self, items: I) -> Result<SelectStatement<Projected>>
    where
        I: IntoIterator,
        I::Item: Into<ResultColumn>,
    {
        self.0.columns(items)
    }

    /// `... *`
    pub fn star(self) -> SelectStatement<Projected> {
        self.0.star()
    }
}

// ===================================================================
// Typestate
// ===================================================================

// Typestate markers (zero-sized types)

/// Marker: projection given.
pub struct Projected;
/// Marker: `FROM` given.
pub struct Sourced;
/// Marker: `WHERE` given.
pub struct Filtered;
/// Marker: `GROUP BY` given.
pub struct Grouped;
/// Marker: `HAVING` given.
pub struct GroupFiltered;
/// Marker: at least one `UNION ALL`.
pub struct Compound;
/// Marker: `ORDER BY` given.
pub struct Sorted;
/// Marker: `LIMIT` given.
pub struct Limited;
/// Marker: `OFFSET` given.
pub struct Offset;
/// Marker: `OFFSET n ROW|ROWS` given.
pub struct OffsetUnit;
/// Marker: `FETCH NEXT|FIRST n`, waiting for `ROW ONLY` or `ROWS ONLY`.
pub struct FetchPending;
/// Marker: `FETCH ... ONLY` given.
pub struct Fetched;

/// States that end a select core: the operand of `UNION ALL`.
pub trait SelectCoreState {}
impl SelectCoreState for Projected {}
impl SelectCoreState for Sourced {}
impl SelectCoreState for Filtered {}
impl SelectCoreState for Grouped {}
impl SelectCoreState for GroupFiltered {}

/// States from which `GROUP BY` is legal.
pub trait Groupable {}
impl Groupable for Sourced {}
impl Groupable for Filtered {}

/// States from which `UNION ALL` and `ORDER BY` are legal.
pub trait Orderable {}
impl<S: SelectCoreState> Orderable for S {}
impl Orderable for Compound {}

/// States from which `LIMIT` is legal.
pub trait Limitable {}
impl<S: Orderable> Limitable for S {}
impl Limitable for Sorted {}

/// States from which `FETCH` is legal.
pub trait Fetchable {}
impl Fetchable for Limited {}
impl Fetchable for Offset {}
impl Fetchable for OffsetUnit {}

/// States that form a complete statement.
pub trait Complete {}
impl<S: Limitable> Complete for S {}
impl Complete for Limited {}
impl Complete for Offset {}
impl Complete for OffsetUnit {}
impl Complete for Fetched {}

/// A SELECT statement in state `S`.
#[must_use]
pub struct SelectStatement<S> {
    data: SelectData,
    _state: PhantomData<S>,
}

impl<S> Clone for SelectStatement<S> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            _state: PhantomData,
        }
    }
}

impl<S> fmt::Debug for SelectStatement<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectStatement")
            .field("data", &self.data)
            .finish()
    }
}

impl<S> SelectStatement<S> {
    fn transition<T>(self) -> SelectStatement<T> {
        SelectStatement {
            data: self.data,
            _state: PhantomData,
        }
    }
}

impl SelectStatement<Projected> {
    /// Appends another projection item.
    pub fn column(mut self, item: impl Into<ResultColumn>) -> Self {
        if let Some(core) = self.data.core_mut() {
            core.columns.push(item.into());
        }
        self
    }

    /// `... FROM table-spec`
    pub fn from(mut self, spec: impl Into<TableSpec>) -> SelectStatement<Sourced> {
        if let Some(core) = self.data.core_mut() {
            core.from = Some(spec.into());
        }
        self.transition()
    }
}

impl SelectStatement<Sourced> {
    /// `... WHERE condition`
    pub fn where_clause(mut self, condition: impl IntoExpr) -> SelectStatement<Filtered> {
        if let Some(core) = self.data.core_mut() {
            core.where_clause = Some(condition.into_expr());
        }
        self.transition()
    }
}

impl<S: Groupable> SelectStatement<S> {
    /// `... GROUP BY expr, ...`
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::InsufficientOperands`] for an empty
    /// list.
    pub fn group_by<I>(mut self, items: I) -> Result<SelectStatement<Grouped>>
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let group_by = collect_at_least("group by", 1, items.into_iter().map(IntoExpr::into_expr))?;
        if let Some(core) = self.data.core_mut() {
            core.group_by = group_by;
        }
        Ok(self.transition())
    }
}

impl SelectStatement<Grouped> {
    /// `... HAVING condition`
    pub fn having(mut self, condition: impl IntoExpr) -> SelectStatement<GroupFiltered> {
        if let Some(core) = self.data.core_mut() {
            core.having = Some(condition.into_expr());
        }
        self.transition()
    }
}

impl<S: Orderable> SelectStatement<S> {
    /// `... UNION ALL core`
    pub fn union_all<T: SelectCoreState>(
        mut self,
        other: SelectStatement<T>,
    ) -> SelectStatement<Compound> {
        self.data.cores.extend(other.data.cores);
        self.transition()
    }

    /// `... ORDER BY term, ...`
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::InsufficientOperands`] for an empty
    /// list.
    pub fn order_by<I>(mut self, terms: I) -> Result<SelectStatement<Sorted>>
    where
        I: IntoIterator,
        I::Item: Into<OrderingTerm>,
    {
        self.data.order_by = collect_at_least("order by", 1, terms.into_iter().map(Into::into))?;
        Ok(self.transition())
    }
}

impl<S: Limitable> SelectStatement<S> {
    /// `... LIMIT n`
    pub fn limit(mut self, count: impl Into<Param>) -> SelectStatement<Limited> {
        self.data.limit = Some(count.into());
        self.transition()
    }
}

impl SelectStatement<Limited> {
    /// `... OFFSET n`
    pub fn offset(mut self, count: impl Into<Param>) -> SelectStatement<Offset> {
        self.data.offset = Some(count.into());
        self.transition()
    }
}

impl SelectStatement<Offset> {
    fn unit(mut self, unit: &'static str) -> SelectStatement<OffsetUnit> {
        self.data.offset_unit = Some(unit);
        self.transition()
    }

    /// `... OFFSET n ROW`
    pub fn row(self) -> SelectStatement<OffsetUnit> {
        self.unit("ROW")
    }

    /// `... OFFSET n ROWS`
    pub fn rows(self) -> SelectStatement<OffsetUnit> {
        self.unit("ROWS")
    }
}

impl<S: Fetchable> SelectStatement<S> {
    fn fetch(mut self, first: bool, count: Param) -> SelectStatement<FetchPending> {
        self.data.fetch = Some(Fetch {
            first,
            count,
            plural: true,
        });
        self.transition()
    }

    /// `... FETCH NEXT n`
    pub fn fetch_next(self, count: impl Into<Param>) -> SelectStatement<FetchPending> {
        self.fetch(false, count.into())
    }

    /// `... FETCH FIRST n`
    pub fn fetch_first(self, count: impl Into<Param>) -> SelectStatement<FetchPending> {
        self.fetch(true, count.into())
    }
}

impl SelectStatement<FetchPending> {
    fn only(mut self, plural: bool) -> SelectStatement<Fetched> {
        if let Some(fetch) = self.data.fetch.as_mut() {
            fetch.plural = plural;
        }
        self.transition()
    }

    /// `... ROW ONLY`
    pub fn row_only(self) -> SelectStatement<Fetched> {
        self.only(false)
    }

    /// `... ROWS ONLY`
    pub fn rows_only(self) -> SelectStatement<Fetched> {
        self.only(true)
    }
}

impl<S: Complete> SqlElement for SelectStatement<S> {
    fn render_into(&self, buf: &mut String) {
        self.data.render_into(buf);
    }
}

impl<S: Complete> Statement for SelectStatement<S> {}

// ===================================================================
// Erased query
// ===================================================================

/// A complete SELECT with its typestate erased, for embedding in
/// expressions and table specs.
#[derive(Clone)]
pub struct SelectQuery(Arc<SelectData>);

impl fmt::Debug for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SelectQuery").field(&self.0).finish()
    }
}

impl<S: Complete> From<SelectStatement<S>> for SelectQuery {
    fn from(statement: SelectStatement<S>) -> Self {
        Self(Arc::new(statement.data))
    }
}

impl SqlElement for SelectQuery {
    fn render_into(&self, buf: &mut String) {
        self.0.render_into(buf);
    }
}

impl Statement for SelectQuery {}
