//! Expression grammar.
//!
//! An [`Expr`] is an immutable, cheaply clonable tree. Each node carries the
//! [`Precedence`] of the production that built it; combinators compare that
//! tag against the level their operand slot requires and wrap the operand in
//! parentheses when it binds too loosely. The decision is taken once, when
//! the node is built, so rendering is a plain left-to-right walk.
//!
//! ```rust
//! use sqlrail_core::expr::{col, lit, ExprTrait};
//!
//! let e = col("x").add(1).mul(-1);
//! assert_eq!(e.to_string(), "(x + 1) * -1");
//!
//! let e = col("x").mul(1).add(-1);
//! assert_eq!(e.to_string(), "x * 1 + -1");
//!
//! let e = col("x").or(col("y")).and(col("z"));
//! assert_eq!(e.to_string(), "(x OR y) AND z");
//!
//! let e = lit("foo").concat(col("s"));
//! assert_eq!(e.to_string(), "'foo' || s");
//! ```

mod bind;
mod functions;
mod ops;
mod ordering;
mod precedence;

use std::fmt;
use std::sync::Arc;

pub use bind::BindParameter;
pub use functions::{
    all, any, avg, cast, count, count_distinct, count_star, exists, func, max, min, not_exists,
    subquery, sum, Case, CaseBranch, CaseElse, CaseOperand, CaseWhen,
};
pub use ops::{bit_not, neg, not, pos, row, subscript, ExprTrait, LikeExpr};
pub use ordering::{Direction, NullsOrder, NullsOrdered, Ordered, OrderingTerm};
pub use precedence::Precedence;

use crate::builder::select::SelectQuery;
use crate::builder::sequence::SequenceValue;
use crate::name::{Name, QualifiedName};
use crate::render::{render, render_comma_list, SqlElement};
use crate::types::DataType;
use crate::value::{SqlValue, ToSqlValue};

/// A SQL expression.
#[derive(Clone)]
pub struct Expr {
    level: Precedence,
    node: Arc<ExprNode>,
}

pub(crate) enum ExprNode {
    Value(SqlValue),
    Keyword(&'static str),
    Column(QualifiedName),
    Bind(BindParameter),
    Paren(Expr),
    Prefix {
        op: &'static str,
        operand: Expr,
    },
    Binary {
        left: Expr,
        op: &'static str,
        right: Expr,
    },
    Postfix {
        operand: Expr,
        op: &'static str,
    },
    Between {
        operand: Expr,
        negated: bool,
        low: Expr,
        high: Expr,
    },
    In {
        operand: Expr,
        negated: bool,
        target: InTarget,
    },
    Like {
        operand: Expr,
        op: &'static str,
        pattern: Expr,
        escape: Option<Expr>,
    },
    Collate {
        operand: Expr,
        collation: Name,
    },
    Row(Vec<Expr>),
    Subscript {
        operand: Expr,
        index: Expr,
    },
    Function {
        name: Name,
        distinct: bool,
        args: FunctionArgs,
    },
    Cast {
        operand: Expr,
        data_type: DataType,
    },
    Case {
        base: Option<Expr>,
        branches: Vec<(Expr, Expr)>,
        otherwise: Option<Expr>,
    },
    Subquery(SelectQuery),
    Exists {
        negated: bool,
        query: SelectQuery,
    },
    Quantified {
        quantifier: &'static str,
        query: SelectQuery,
    },
    Sequence(SequenceValue),
}

/// Right-hand side of `IN`.
pub(crate) enum InTarget {
    List(Vec<Expr>),
    Table(QualifiedName),
    Function(QualifiedName, Vec<Expr>),
    Select(SelectQuery),
}

pub(crate) enum FunctionArgs {
    Star,
    List(Vec<Expr>),
}

impl Expr {
    pub(crate) fn new(level: Precedence, node: ExprNode) -> Self {
        Self {
            level,
            node: Arc::new(node),
        }
    }

    pub(crate) fn primary(node: ExprNode) -> Self {
        Self::new(Precedence::Primary, node)
    }

    /// The precedence level this expression was built at.
    #[must_use]
    pub const fn precedence(&self) -> Precedence {
        self.level
    }

    /// Returns `self`, parenthesized if it binds looser than `required`.
    #[must_use]
    pub(crate) fn at_least(self, required: Precedence) -> Self {
        if self.level >= required {
            self
        } else {
            Self::primary(ExprNode::Paren(self))
        }
    }

    /// Whether this is a bare literal (including `CURRENT_*` keywords).
    #[must_use]
    pub(crate) fn is_literal(&self) -> bool {
        matches!(&*self.node, ExprNode::Value(_) | ExprNode::Keyword(_))
    }
}

impl SqlElement for Expr {
    fn render_into(&self, buf: &mut String) {
        self.node.render_into(buf);
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expr")
            .field("level", &self.level)
            .field("sql", &render(self))
            .finish()
    }
}

impl SqlElement for ExprNode {
    fn render_into(&self, buf: &mut String) {
        match self {
            Self::Value(value) => value.render_into(buf),
            Self::Keyword(keyword) => buf.push_str(keyword),
            Self::Column(name) => name.render_into(buf),
            Self::Bind(param) => param.render_into(buf),
            Self::Paren(inner) => {
                buf.push('(');
                inner.render_into(buf);
                buf.push(')');
            }
            Self::Prefix { op, operand } => {
                buf.push_str(op);
                operand.render_into(buf);
            }
            Self::Binary { left, op, right } => {
                left.render_into(buf);
                buf.push(' ');
                buf.push_str(op);
                buf.push(' ');
                right.render_into(buf);
            }
            Self::Postfix { operand, op } => {
                operand.render_into(buf);
                buf.push(' ');
                buf.push_str(op);
            }
            Self::Between {
                operand,
                negated,
                low,
                high,
            } => {
                operand.render_into(buf);
                buf.push_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                low.render_into(buf);
                buf.push_str(" AND ");
                high.render_into(buf);
            }
            Self::In {
                operand,
                negated,
                target,
            } => {
                operand.render_into(buf);
                buf.push_str(if *negated { " NOT IN " } else { " IN " });
                target.render_into(buf);
            }
            Self::Like {
                operand,
                op,
                pattern,
                escape,
            } => {
                operand.render_into(buf);
                buf.push(' ');
                buf.push_str(op);
                buf.push(' ');
                pattern.render_into(buf);
                if let Some(escape) = escape {
                    buf.push_str(" ESCAPE ");
                    escape.render_into(buf);
                }
            }
            Self::Collate { operand, collation } => {
                operand.render_into(buf);
                buf.push_str(" COLLATE ");
                collation.render_into(buf);
            }
            Self::Row(items) => {
                buf.push('(');
                render_comma_list(items, buf);
                buf.push(')');
            }
            Self::Subscript { operand, index } => {
                operand.render_into(buf);
                buf.push('[');
                index.render_into(buf);
                buf.push(']');
            }
            Self::Function {
                name,
                distinct,
                args,
            } => {
                name.render_into(buf);
                buf.push('(');
                if *distinct {
                    buf.push_str("DISTINCT ");
                }
                match args {
                    FunctionArgs::Star => buf.push('*'),
                    FunctionArgs::List(args) => render_comma_list(args, buf),
                }
                buf.push(')');
            }
            Self::Cast { operand, data_type } => {
                buf.push_str("CAST (");
                operand.render_into(buf);
                buf.push_str(" AS ");
                data_type.render_into(buf);
                buf.push(')');
            }
            Self::Case {
                base,
                branches,
                otherwise,
            } => {
                buf.push_str("CASE");
                if let Some(base) = base {
                    buf.push(' ');
                    base.render_into(buf);
                }
                for (when, then) in branches {
                    buf.push_str(" WHEN ");
                    when.render_into(buf);
                    buf.push_str(" THEN ");
                    then.render_into(buf);
                }
                if let Some(otherwise) = otherwise {
                    buf.push_str(" ELSE ");
                    otherwise.render_into(buf);
                }
                buf.push_str(" END");
            }
            Self::Subquery(query) => {
                buf.push('(');
                query.render_into(buf);
                buf.push(')');
            }
            Self::Exists { negated, query } => {
                buf.push_str(if *negated { "NOT EXISTS (" } else { "EXISTS (" });
                query.render_into(buf);
                buf.push(')');
            }
            Self::Quantified { quantifier, query } => {
                buf.push_str(quantifier);
                buf.push('(');
                query.render_into(buf);
                buf.push(')');
            }
            Self::Sequence(value) => value.render_into(buf),
        }
    }
}

impl SqlElement for InTarget {
    fn render_into(&self, buf: &mut String) {
        match self {
            Self::List(items) => {
                buf.push('(');
                render_comma_list(items, buf);
                buf.push(')');
            }
            Self::Table(name) => name.render_into(buf),
            Self::Function(name, args) => {
                name.render_into(buf);
                buf.push('(');
                render_comma_list(args, buf);
                buf.push(')');
            }
            Self::Select(query) => {
                buf.push('(');
                query.render_into(buf);
                buf.push(')');
            }
        }
    }
}

/// Conversion into an expression operand.
///
/// Implemented for [`Expr`], for the intermediate expression states (such
/// as [`LikeExpr`]), for bind parameters, and for every [`ToSqlValue`] type,
/// which becomes a literal.
pub trait IntoExpr {
    /// Converts `self` into an expression.
    fn into_expr(self) -> Expr;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

impl<T: ToSqlValue> IntoExpr for T {
    fn into_expr(self) -> Expr {
        lit(self)
    }
}

impl IntoExpr for BindParameter {
    fn into_expr(self) -> Expr {
        Expr::primary(ExprNode::Bind(self))
    }
}

/// A literal value.
///
/// Negative numbers are tagged [`Precedence::Unary`] since they render with
/// a leading minus sign; every other literal is an atom.
#[must_use]
pub fn lit(value: impl ToSqlValue) -> Expr {
    let value = value.to_sql_value();
    let level = if value.is_negative_number() {
        Precedence::Unary
    } else {
        Precedence::Primary
    };
    Expr::new(level, ExprNode::Value(value))
}

/// The `NULL` literal.
#[must_use]
pub fn null() -> Expr {
    lit(SqlValue::Null)
}

/// A column reference.
#[must_use]
pub fn col(name: impl Into<Name>) -> Expr {
    Expr::primary(ExprNode::Column(QualifiedName::new(name)))
}

/// A column reference qualified by a table name or alias: `t.x`.
#[must_use]
pub fn col_in(table: impl Into<Name>, name: impl Into<Name>) -> Expr {
    Expr::primary(ExprNode::Column(QualifiedName::qualified(table, name)))
}

/// `CURRENT_DATE`
#[must_use]
pub fn current_date() -> Expr {
    Expr::primary(ExprNode::Keyword("CURRENT_DATE"))
}

/// `CURRENT_TIME`
#[must_use]
pub fn current_time() -> Expr {
    Expr::primary(ExprNode::Keyword("CURRENT_TIME"))
}

/// `CURRENT_TIMESTAMP`
#[must_use]
pub fn current_timestamp() -> Expr {
    Expr::primary(ExprNode::Keyword("CURRENT_TIMESTAMP"))
}

/// A literal built from a dynamically typed JSON value.
///
/// # Errors
///
/// Returns [`crate::BuildError::UnsupportedLiteralType`] for arrays, objects
/// and integers that do not fit in `i64`.
#[cfg(feature = "json")]
pub fn json_lit(value: &serde_json::Value) -> crate::Result<Expr> {
    SqlValue::try_from(value).map(lit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_levels() {
        assert_eq!(lit(1).precedence(), Precedence::Primary);
        assert_eq!(lit(-1).precedence(), Precedence::Unary);
        assert_eq!(lit(-1.5).precedence(), Precedence::Unary);
        assert_eq!(lit("x").precedence(), Precedence::Primary);
    }

    #[test]
    fn test_atoms() {
        assert_eq!(lit(true).to_string(), "TRUE");
        assert_eq!(lit(1.0).to_string(), "1.0");
        assert_eq!(null().to_string(), "NULL");
        assert_eq!(lit("it's").to_string(), "'it''s'");
        assert_eq!(col("name").to_string(), "name");
        assert_eq!(col("my col").to_string(), "\"my col\"");
        assert_eq!(col_in("e", "dept_id").to_string(), "e.dept_id");
        assert_eq!(current_timestamp().to_string(), "CURRENT_TIMESTAMP");
        assert_eq!(BindParameter::anonymous().into_expr().to_string(), "?");
    }

    #[test]
    fn test_at_least_wraps_loose_operands() {
        let e = col("a").or(col("b"));
        assert_eq!(e.clone().at_least(Precedence::Or).to_string(), "a OR b");
        let wrapped = e.at_least(Precedence::And);
        assert_eq!(wrapped.to_string(), "(a OR b)");
        assert_eq!(wrapped.precedence(), Precedence::Primary);
    }

    #[test]
    fn test_is_literal() {
        assert!(lit(0).is_literal());
        assert!(lit(-1).is_literal());
        assert!(current_date().is_literal());
        assert!(!col("x").is_literal());
        assert!(!lit(1).add(2).is_literal());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_lit() {
        let e = json_lit(&serde_json::json!("abc")).unwrap();
        assert_eq!(e.to_string(), "'abc'");
        assert!(json_lit(&serde_json::json!([1])).is_err());
    }
}
