//! Indexed columns: the entries of `CREATE INDEX`, `PRIMARY KEY (...)` and
//! `UNIQUE (...)` lists.

use super::column::ColumnName;
use crate::expr::{col, Direction, Expr, IntoExpr, Ordered, Precedence};
use crate::name::Name;
use crate::render::SqlElement;

/// `expr [COLLATE name] [ASC|DESC]`
///
/// `collate` and `asc`/`desc` may be called in either order; the output is
/// always in grammar order.
///
/// ```rust
/// use sqlrail_core::definition::IndexedColumn;
/// use sqlrail_core::render;
///
/// let a = IndexedColumn::from("a").desc().collate("NOCASE");
/// let b = IndexedColumn::from("a").collate("NOCASE").desc();
/// assert_eq!(render(&a), "a COLLATE NOCASE DESC");
/// assert_eq!(render(&a), render(&b));
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct IndexedColumn {
    expr: Expr,
    collation: Option<Name>,
    direction: Option<Direction>,
}

impl IndexedColumn {
    fn new(expr: Expr, direction: Option<Direction>) -> Self {
        Self {
            expr,
            collation: None,
            direction,
        }
    }

    /// `... COLLATE name`
    pub fn collate(self, collation: impl Into<Name>) -> Self {
        Self {
            expr: self.expr.at_least(Precedence::Collate),
            collation: Some(collation.into()),
            direction: self.direction,
        }
    }

    /// `... ASC`
    pub fn asc(self) -> Self {
        Self {
            direction: Some(Direction::Asc),
            ..self
        }
    }

    /// `... DESC`
    pub fn desc(self) -> Self {
        Self {
            direction: Some(Direction::Desc),
            ..self
        }
    }
}

impl SqlElement for IndexedColumn {
    fn render_into(&self, buf: &mut String) {
        self.expr.render_into(buf);
        if let Some(collation) = &self.collation {
            buf.push_str(" COLLATE ");
            collation.render_into(buf);
        }
        if let Some(direction) = self.direction {
            buf.push(' ');
            buf.push_str(direction.as_sql());
        }
    }
}

impl From<&str> for IndexedColumn {
    fn from(name: &str) -> Self {
        Self::new(col(name), None)
    }
}

impl From<String> for IndexedColumn {
    fn from(name: String) -> Self {
        Self::new(col(name), None)
    }
}

impl From<Name> for IndexedColumn {
    fn from(name: Name) -> Self {
        Self::new(col(name), None)
    }
}

impl From<ColumnName> for IndexedColumn {
    fn from(name: ColumnName) -> Self {
        Self::new(name.into_expr(), None)
    }
}

impl From<Expr> for IndexedColumn {
    fn from(expr: Expr) -> Self {
        Self::new(expr, None)
    }
}

impl From<Ordered> for IndexedColumn {
    fn from(ordered: Ordered) -> Self {
        Self::new(ordered.expr, Some(ordered.direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::column;
    use crate::expr::ExprTrait;
    use crate::render::render;

    #[test]
    fn test_plain_names() {
        assert_eq!(render(&IndexedColumn::from("a")), "a");
        assert_eq!(render(&IndexedColumn::from("my col")), "\"my col\"");
        assert_eq!(render(&column("b").desc()), "b DESC");
    }

    #[test]
    fn test_collation_and_direction_in_any_order() {
        let first = column("b").asc().collate("c");
        let second = IndexedColumn::from("b").collate("c").asc();
        assert_eq!(render(&first), "b COLLATE c ASC");
        assert_eq!(render(&second), "b COLLATE c ASC");
    }

    #[test]
    fn test_expression_columns() {
        assert_eq!(render(&IndexedColumn::from(col("a").add(col("b")))), "a + b");
        assert_eq!(
            render(&IndexedColumn::from(col("a").concat(col("b"))).collate("NOCASE")),
            "(a || b) COLLATE NOCASE"
        );
        assert_eq!(render(&IndexedColumn::from(col("a").desc())), "a DESC");
    }
}
