//! Expression operators.

use std::fmt;

use super::ordering::{Direction, NullsOrder, NullsOrdered, Ordered};
use super::{Expr, ExprNode, InTarget, IntoExpr, Precedence};
use crate::builder::select::{ResultColumn, SelectQuery};
use crate::error::{collect_at_least, Result};
use crate::name::{Name, QualifiedName};
use crate::render::{render, SqlElement};

fn binary(left: Expr, op: &'static str, level: Precedence, right: impl IntoExpr) -> Expr {
    Expr::new(
        level,
        ExprNode::Binary {
            left: left.at_least(level),
            op,
            right: right.into_expr().at_least(level.tighter()),
        },
    )
}

fn postfix(operand: Expr, op: &'static str) -> Expr {
    Expr::new(
        Precedence::Equality,
        ExprNode::Postfix {
            operand: operand.at_least(Precedence::Equality),
            op,
        },
    )
}

fn in_target(operand: Expr, negated: bool, target: InTarget) -> Expr {
    Expr::new(
        Precedence::Equality,
        ExprNode::In {
            operand: operand.at_least(Precedence::Equality),
            negated,
            target,
        },
    )
}

fn between(operand: Expr, negated: bool, low: impl IntoExpr, high: impl IntoExpr) -> Expr {
    Expr::new(
        Precedence::Equality,
        ExprNode::Between {
            operand: operand.at_least(Precedence::Equality),
            negated,
            low: low.into_expr().at_least(Precedence::Comparison),
            high: high.into_expr().at_least(Precedence::Comparison),
        },
    )
}

fn pattern(operand: Expr, op: &'static str, pattern: impl IntoExpr) -> Expr {
    LikeExpr::new(operand, op, pattern).into_expr()
}

/// Operators available on every expression.
///
/// Each method consumes its receiver and returns a new node; clone an
/// expression to use it in several places.
pub trait ExprTrait: IntoExpr + Sized {
    /// `self OR other`
    fn or(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "OR", Precedence::Or, other)
    }

    /// `self AND other`
    fn and(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "AND", Precedence::And, other)
    }

    /// `self = other`
    fn eq(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "=", Precedence::Equality, other)
    }

    /// `self == other`
    fn double_eq(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "==", Precedence::Equality, other)
    }

    /// `self != other`
    fn not_eq(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "!=", Precedence::Equality, other)
    }

    /// `self <> other`
    fn lt_gt(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "<>", Precedence::Equality, other)
    }

    /// `self < other`
    fn lt(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "<", Precedence::Comparison, other)
    }

    /// `self <= other`
    fn lt_eq(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "<=", Precedence::Comparison, other)
    }

    /// `self > other`
    fn gt(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), ">", Precedence::Comparison, other)
    }

    /// `self >= other`
    fn gt_eq(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), ">=", Precedence::Comparison, other)
    }

    /// `self IS other`
    fn is(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "IS", Precedence::Equality, other)
    }

    /// `self IS NOT other`
    fn is_not(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "IS NOT", Precedence::Equality, other)
    }

    /// `self IS DISTINCT FROM other`
    fn is_distinct_from(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "IS DISTINCT FROM", Precedence::Equality, other)
    }

    /// `self IS NOT DISTINCT FROM other`
    fn is_not_distinct_from(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "IS NOT DISTINCT FROM", Precedence::Equality, other)
    }

    /// `self BETWEEN low AND high`
    fn between(self, low: impl IntoExpr, high: impl IntoExpr) -> Expr {
        between(self.into_expr(), false, low, high)
    }

    /// `self NOT BETWEEN low AND high`
    fn not_between(self, low: impl IntoExpr, high: impl IntoExpr) -> Expr {
        between(self.into_expr(), true, low, high)
    }

    /// `self IN (a, b, ...)`; an empty list renders `self IN ()`.
    fn in_list<I>(self, items: I) -> Expr
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let items = items.into_iter().map(IntoExpr::into_expr).collect();
        in_target(self.into_expr(), false, InTarget::List(items))
    }

    /// `self NOT IN (a, b, ...)`
    fn not_in_list<I>(self, items: I) -> Expr
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let items = items.into_iter().map(IntoExpr::into_expr).collect();
        in_target(self.into_expr(), true, InTarget::List(items))
    }

    /// `self IN schema.table`
    fn in_table(self, table: impl Into<QualifiedName>) -> Expr {
        in_target(self.into_expr(), false, InTarget::Table(table.into()))
    }

    /// `self NOT IN schema.table`
    fn not_in_table(self, table: impl Into<QualifiedName>) -> Expr {
        in_target(self.into_expr(), true, InTarget::Table(table.into()))
    }

    /// `self IN schema.function(args)`, for table-valued functions.
    fn in_function<I>(self, function: impl Into<QualifiedName>, args: I) -> Expr
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let args = args.into_iter().map(IntoExpr::into_expr).collect();
        in_target(self.into_expr(), false, InTarget::Function(function.into(), args))
    }

    /// `self NOT IN schema.function(args)`
    fn not_in_function<I>(self, function: impl Into<QualifiedName>, args: I) -> Expr
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        let args = args.into_iter().map(IntoExpr::into_expr).collect();
        in_target(self.into_expr(), true, InTarget::Function(function.into(), args))
    }

    /// `self IN (SELECT ...)`
    fn in_select(self, query: impl Into<SelectQuery>) -> Expr {
        in_target(self.into_expr(), false, InTarget::Select(query.into()))
    }

    /// `self NOT IN (SELECT ...)`
    fn not_in_select(self, query: impl Into<SelectQuery>) -> Expr {
        in_target(self.into_expr(), true, InTarget::Select(query.into()))
    }

    /// `self LIKE pattern`, optionally followed by `ESCAPE`.
    fn like(self, pattern: impl IntoExpr) -> LikeExpr {
        LikeExpr::new(self.into_expr(), "LIKE", pattern)
    }

    /// `self NOT LIKE pattern`, optionally followed by `ESCAPE`.
    fn not_like(self, pattern: impl IntoExpr) -> LikeExpr {
        LikeExpr::new(self.into_expr(), "NOT LIKE", pattern)
    }

    /// `self ILIKE pattern`, the case-insensitive match of Phoenix and
    /// PostgreSQL.
    fn ilike(self, pattern: impl IntoExpr) -> LikeExpr {
        LikeExpr::new(self.into_expr(), "ILIKE", pattern)
    }

    /// `self NOT ILIKE pattern`
    fn not_ilike(self, pattern: impl IntoExpr) -> LikeExpr {
        LikeExpr::new(self.into_expr(), "NOT ILIKE", pattern)
    }

    /// `self GLOB pattern`
    fn glob(self, other: impl IntoExpr) -> Expr {
        pattern(self.into_expr(), "GLOB", other)
    }

    /// `self NOT GLOB pattern`
    fn not_glob(self, other: impl IntoExpr) -> Expr {
        pattern(self.into_expr(), "NOT GLOB", other)
    }

    /// `self REGEXP pattern`
    fn regexp(self, other: impl IntoExpr) -> Expr {
        pattern(self.into_expr(), "REGEXP", other)
    }

    /// `self NOT REGEXP pattern`
    fn not_regexp(self, other: impl IntoExpr) -> Expr {
        pattern(self.into_expr(), "NOT REGEXP", other)
    }

    /// `self MATCH pattern`
    fn matches(self, other: impl IntoExpr) -> Expr {
        pattern(self.into_expr(), "MATCH", other)
    }

    /// `self NOT MATCH pattern`
    fn not_matches(self, other: impl IntoExpr) -> Expr {
        pattern(self.into_expr(), "NOT MATCH", other)
    }

    /// `self ISNULL`
    fn isnull(self) -> Expr {
        postfix(self.into_expr(), "ISNULL")
    }

    /// `self NOTNULL`
    fn notnull(self) -> Expr {
        postfix(self.into_expr(), "NOTNULL")
    }

    /// `self NOT NULL`
    fn not_null(self) -> Expr {
        postfix(self.into_expr(), "NOT NULL")
    }

    /// `self & other`
    fn bit_and(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "&", Precedence::Bitwise, other)
    }

    /// `self | other`
    fn bit_or(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "|", Precedence::Bitwise, other)
    }

    /// `self << other`
    fn shift_left(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "<<", Precedence::Bitwise, other)
    }

    /// `self >> other`
    fn shift_right(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), ">>", Precedence::Bitwise, other)
    }

    /// `self + other`
    fn add(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "+", Precedence::Additive, other)
    }

    /// `self - other`
    fn sub(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "-", Precedence::Additive, other)
    }

    /// `self * other`
    fn mul(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "*", Precedence::Multiplicative, other)
    }

    /// `self / other`
    fn div(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "/", Precedence::Multiplicative, other)
    }

    /// `self % other`
    fn rem(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "%", Precedence::Multiplicative, other)
    }

    /// `self || other`
    fn concat(self, other: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "||", Precedence::Concat, other)
    }

    /// `self -> path`
    fn extract(self, path: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "->", Precedence::Concat, path)
    }

    /// `self ->> path`
    fn extract_text(self, path: impl IntoExpr) -> Expr {
        binary(self.into_expr(), "->>", Precedence::Concat, path)
    }

    /// `self COLLATE name`
    fn collate(self, collation: impl Into<Name>) -> Expr {
        Expr::new(
            Precedence::Collate,
            ExprNode::Collate {
                operand: self.into_expr().at_least(Precedence::Collate),
                collation: collation.into(),
            },
        )
    }

    /// `self ASC`
    fn asc(self) -> Ordered {
        Ordered::new(self.into_expr(), Direction::Asc)
    }

    /// `self DESC`
    fn desc(self) -> Ordered {
        Ordered::new(self.into_expr(), Direction::Desc)
    }

    /// `self NULLS FIRST`
    fn nulls_first(self) -> NullsOrdered {
        NullsOrdered::new(self.into_expr(), None, NullsOrder::First)
    }

    /// `self NULLS LAST`
    fn nulls_last(self) -> NullsOrdered {
        NullsOrdered::new(self.into_expr(), None, NullsOrder::Last)
    }

    /// `self AS alias`, as a result column.
    fn alias(self, alias: impl Into<Name>) -> ResultColumn {
        ResultColumn::aliased(self.into_expr(), alias.into(), true)
    }

    /// `self alias`, as a result column without the `AS` keyword.
    fn alias_implicit(self, alias: impl Into<Name>) -> ResultColumn {
        ResultColumn::aliased(self.into_expr(), alias.into(), false)
    }
}

impl ExprTrait for Expr {}

fn prefix(op: &'static str, level: Precedence, required: Precedence, operand: impl IntoExpr) -> Expr {
    Expr::new(
        level,
        ExprNode::Prefix {
            op,
            operand: operand.into_expr().at_least(required),
        },
    )
}

/// `NOT operand`
#[must_use]
pub fn not(operand: impl IntoExpr) -> Expr {
    prefix("NOT ", Precedence::Not, Precedence::Not, operand)
}

/// `-operand`
///
/// The operand must be an atom, so `neg(lit(-1))` renders `-(-1)` rather
/// than the comment marker `--1`.
#[must_use]
pub fn neg(operand: impl IntoExpr) -> Expr {
    prefix("-", Precedence::Unary, Precedence::Primary, operand)
}

/// `+operand`
#[must_use]
pub fn pos(operand: impl IntoExpr) -> Expr {
    prefix("+", Precedence::Unary, Precedence::Primary, operand)
}

/// `~operand`
#[must_use]
pub fn bit_not(operand: impl IntoExpr) -> Expr {
    prefix("~", Precedence::Unary, Precedence::Primary, operand)
}

/// A row value: `(a, b, ...)`.
///
/// # Errors
///
/// Returns [`crate::BuildError::InsufficientOperands`] when fewer than two
/// items are given.
pub fn row<I>(items: I) -> Result<Expr>
where
    I: IntoIterator,
    I::Item: IntoExpr,
{
    let items = collect_at_least("row value", 2, items.into_iter().map(IntoExpr::into_expr))?;
    Ok(Expr::primary(ExprNode::Row(items)))
}

/// Array element access: `array[index]`.
///
/// SQLite has no arrays; this is for dialects that do, such as Phoenix,
/// where indexes start at 1.
pub fn subscript(array: impl IntoExpr, index: impl IntoExpr) -> Expr {
    Expr::primary(ExprNode::Subscript {
        operand: array.into_expr().at_least(Precedence::Primary),
        index: index.into_expr(),
    })
}

/// A `[NOT] LIKE` or `[NOT] ILIKE` expression that may still take an
/// `ESCAPE`.
#[derive(Debug, Clone)]
#[must_use]
pub struct LikeExpr {
    operand: Expr,
    op: &'static str,
    pattern: Expr,
}

impl LikeExpr {
    fn new(operand: Expr, op: &'static str, pattern: impl IntoExpr) -> Self {
        Self {
            operand: operand.at_least(Precedence::Equality),
            op,
            pattern: pattern.into_expr().at_least(Precedence::Comparison),
        }
    }

    fn finish(self, escape: Option<Expr>) -> Expr {
        Expr::new(
            Precedence::Equality,
            ExprNode::Like {
                operand: self.operand,
                op: self.op,
                pattern: self.pattern,
                escape,
            },
        )
    }

    /// `... ESCAPE escape`
    pub fn escape(self, escape: impl IntoExpr) -> Expr {
        let escape = escape.into_expr().at_least(Precedence::Comparison);
        self.finish(Some(escape))
    }
}

impl IntoExpr for LikeExpr {
    fn into_expr(self) -> Expr {
        self.finish(None)
    }
}

impl ExprTrait for LikeExpr {}

impl SqlElement for LikeExpr {
    fn render_into(&self, buf: &mut String) {
        self.clone().into_expr().render_into(buf);
    }
}

impl fmt::Display for LikeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
