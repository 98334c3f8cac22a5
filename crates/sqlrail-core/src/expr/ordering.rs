//! Ordering terms: `expr [ASC|DESC] [NULLS FIRST|LAST]`.

use super::{Expr, ExprTrait};
use crate::name::Name;
use crate::render::SqlElement;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `ASC`
    Asc,
    /// `DESC`
    Desc,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Placement of NULLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    /// `NULLS FIRST`
    First,
    /// `NULLS LAST`
    Last,
}

/// An expression followed by `ASC` or `DESC`.
///
/// Usable as an ordering term and as an indexed column.
#[derive(Debug, Clone)]
#[must_use]
pub struct Ordered {
    pub(crate) expr: Expr,
    pub(crate) direction: Direction,
}

impl Ordered {
    pub(crate) const fn new(expr: Expr, direction: Direction) -> Self {
        Self { expr, direction }
    }

    /// Attaches a collation; it renders before the direction.
    pub fn collate(self, collation: impl Into<Name>) -> Self {
        Self {
            expr: self.expr.collate(collation),
            direction: self.direction,
        }
    }

    /// `... NULLS FIRST`
    pub fn nulls_first(self) -> NullsOrdered {
        NullsOrdered::new(self.expr, Some(self.direction), NullsOrder::First)
    }

    /// `... NULLS LAST`
    pub fn nulls_last(self) -> NullsOrdered {
        NullsOrdered::new(self.expr, Some(self.direction), NullsOrder::Last)
    }
}

/// An ordering term with an explicit `NULLS FIRST` or `NULLS LAST`.
#[derive(Debug, Clone)]
#[must_use]
pub struct NullsOrdered {
    expr: Expr,
    direction: Option<Direction>,
    nulls: NullsOrder,
}

impl NullsOrdered {
    pub(crate) const fn new(expr: Expr, direction: Option<Direction>, nulls: NullsOrder) -> Self {
        Self {
            expr,
            direction,
            nulls,
        }
    }
}

/// One entry of an `ORDER BY` list.
#[derive(Debug, Clone)]
pub struct OrderingTerm {
    expr: Expr,
    direction: Option<Direction>,
    nulls: Option<NullsOrder>,
}

impl From<Expr> for OrderingTerm {
    fn from(expr: Expr) -> Self {
        Self {
            expr,
            direction: None,
            nulls: None,
        }
    }
}

impl From<Ordered> for OrderingTerm {
    fn from(ordered: Ordered) -> Self {
        Self {
            expr: ordered.expr,
            direction: Some(ordered.direction),
            nulls: None,
        }
    }
}

impl From<NullsOrdered> for OrderingTerm {
    fn from(ordered: NullsOrdered) -> Self {
        Self {
            expr: ordered.expr,
            direction: ordered.direction,
            nulls: Some(ordered.nulls),
        }
    }
}

impl SqlElement for OrderingTerm {
    fn render_into(&self, buf: &mut String) {
        self.expr.render_into(buf);
        if let Some(direction) = self.direction {
            buf.push(' ');
            buf.push_str(direction.as_sql());
        }
        match self.nulls {
            Some(NullsOrder::First) => buf.push_str(" NULLS FIRST"),
            Some(NullsOrder::Last) => buf.push_str(" NULLS LAST"),
            None => {}
        }
    }
}

impl SqlElement for Ordered {
    fn render_into(&self, buf: &mut String) {
        OrderingTerm::from(self.clone()).render_into(buf);
    }
}

impl SqlElement for NullsOrdered {
    fn render_into(&self, buf: &mut String) {
        OrderingTerm::from(self.clone()).render_into(buf);
    }
}
