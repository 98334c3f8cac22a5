//! Function calls, CAST, CASE and sub-select expressions.

use super::{Expr, ExprNode, FunctionArgs, IntoExpr};
use crate::builder::select::SelectQuery;
use crate::name::Name;
use crate::types::DataType;

/// A call to an arbitrary function: `name(arg, ...)`.
#[must_use]
pub fn func<I>(name: impl Into<Name>, args: I) -> Expr
where
    I: IntoIterator,
    I::Item: IntoExpr,
{
    Expr::primary(ExprNode::Function {
        name: name.into(),
        distinct: false,
        args: FunctionArgs::List(args.into_iter().map(IntoExpr::into_expr).collect()),
    })
}

fn aggregate(name: &str, distinct: bool, arg: impl IntoExpr) -> Expr {
    Expr::primary(ExprNode::Function {
        name: Name::new(name),
        distinct,
        args: FunctionArgs::List(vec![arg.into_expr()]),
    })
}

/// `COUNT(*)`
#[must_use]
pub fn count_star() -> Expr {
    Expr::primary(ExprNode::Function {
        name: Name::new("COUNT"),
        distinct: false,
        args: FunctionArgs::Star,
    })
}

/// `COUNT(x)`
#[must_use]
pub fn count(arg: impl IntoExpr) -> Expr {
    aggregate("COUNT", false, arg)
}

/// `COUNT(DISTINCT x)`
#[must_use]
pub fn count_distinct(arg: impl IntoExpr) -> Expr {
    aggregate("COUNT", true, arg)
}

/// `SUM(x)`
#[must_use]
pub fn sum(arg: impl IntoExpr) -> Expr {
    aggregate("SUM", false, arg)
}

/// `AVG(x)`
#[must_use]
pub fn avg(arg: impl IntoExpr) -> Expr {
    aggregate("AVG", false, arg)
}

/// `MIN(x)`
#[must_use]
pub fn min(arg: impl IntoExpr) -> Expr {
    aggregate("MIN", false, arg)
}

/// `MAX(x)`
#[must_use]
pub fn max(arg: impl IntoExpr) -> Expr {
    aggregate("MAX", false, arg)
}

/// `CAST (x AS type)`
#[must_use]
pub fn cast(operand: impl IntoExpr, data_type: impl Into<DataType>) -> Expr {
    Expr::primary(ExprNode::Cast {
        operand: operand.into_expr(),
        data_type: data_type.into(),
    })
}

/// A scalar sub-select: `(SELECT ...)`.
#[must_use]
pub fn subquery(query: impl Into<SelectQuery>) -> Expr {
    Expr::primary(ExprNode::Subquery(query.into()))
}

/// `EXISTS (SELECT ...)`
#[must_use]
pub fn exists(query: impl Into<SelectQuery>) -> Expr {
    Expr::primary(ExprNode::Exists {
        negated: false,
        query: query.into(),
    })
}

/// `NOT EXISTS (SELECT ...)`
#[must_use]
pub fn not_exists(query: impl Into<SelectQuery>) -> Expr {
    Expr::primary(ExprNode::Exists {
        negated: true,
        query: query.into(),
    })
}

/// `ANY(SELECT ...)`, the right-hand side of a quantified comparison.
#[must_use]
pub fn any(query: impl Into<SelectQuery>) -> Expr {
    Expr::primary(ExprNode::Quantified {
        quantifier: "ANY",
        query: query.into(),
    })
}

/// `ALL(SELECT ...)`
#[must_use]
pub fn all(query: impl Into<SelectQuery>) -> Expr {
    Expr::primary(ExprNode::Quantified {
        quantifier: "ALL",
        query: query.into(),
    })
}

// ===================================================================
// CASE
// ===================================================================

/// Entry point of a `CASE` expression.
///
/// ```rust
/// use sqlrail_core::expr::{col, lit, Case, ExprTrait};
///
/// let e = Case
///     .when(col("CNT").lt(10))
///     .then("Low")
///     .else_("High")
///     .end();
/// assert_eq!(e.to_string(), "CASE WHEN CNT < 10 THEN 'Low' ELSE 'High' END");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Case;

impl Case {
    /// `CASE base ...`
    pub fn of(self, base: impl IntoExpr) -> CaseOperand {
        CaseOperand {
            base: base.into_expr(),
        }
    }

    /// `CASE WHEN condition ...`
    pub fn when(self, condition: impl IntoExpr) -> CaseWhen {
        CaseWhen {
            base: None,
            branches: vec![],
            when: condition.into_expr(),
        }
    }
}

/// `CASE base`, waiting for the first `WHEN`.
#[derive(Debug, Clone)]
#[must_use]
pub struct CaseOperand {
    base: Expr,
}

impl CaseOperand {
    /// `... WHEN value`
    pub fn when(self, value: impl IntoExpr) -> CaseWhen {
        CaseWhen {
            base: Some(self.base),
            branches: vec![],
            when: value.into_expr(),
        }
    }
}

/// A `WHEN` waiting for its `THEN`.
#[derive(Debug, Clone)]
#[must_use]
pub struct CaseWhen {
    base: Option<Expr>,
    branches: Vec<(Expr, Expr)>,
    when: Expr,
}

impl CaseWhen {
    /// `... THEN result`
    pub fn then(self, result: impl IntoExpr) -> CaseBranch {
        let mut branches = self.branches;
        branches.push((self.when, result.into_expr()));
        CaseBranch {
            base: self.base,
            branches,
        }
    }
}

/// A complete `WHEN ... THEN ...` pair.
#[derive(Debug, Clone)]
#[must_use]
pub struct CaseBranch {
    base: Option<Expr>,
    branches: Vec<(Expr, Expr)>,
}

impl CaseBranch {
    /// Another `WHEN`.
    pub fn when(self, condition: impl IntoExpr) -> CaseWhen {
        CaseWhen {
            base: self.base,
            branches: self.branches,
            when: condition.into_expr(),
        }
    }

    /// `ELSE result`
    pub fn else_(self, result: impl IntoExpr) -> CaseElse {
        CaseElse {
            base: self.base,
            branches: self.branches,
            otherwise: result.into_expr(),
        }
    }

    /// `END`
    pub fn end(self) -> Expr {
        Expr::primary(ExprNode::Case {
            base: self.base,
            branches: self.branches,
            otherwise: None,
        })
    }
}

/// A `CASE` expression after its `ELSE`.
#[derive(Debug, Clone)]
#[must_use]
pub struct CaseElse {
    base: Option<Expr>,
    branches: Vec<(Expr, Expr)>,
    otherwise: Expr,
}

impl CaseElse {
    /// `END`
    pub fn end(self) -> Expr {
        Expr::primary(ExprNode::Case {
            base: self.base,
            branches: self.branches,
            otherwise: Some(self.otherwise),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{col, lit, ExprTrait};
    use crate::types::TypeName;

    #[test]
    fn test_aggregates() {
        assert_eq!(count_star().to_string(), "COUNT(*)");
        assert_eq!(count(1).to_string(), "COUNT(1)");
        assert_eq!(count_distinct(col("x")).to_string(), "COUNT(DISTINCT x)");
        assert_eq!(sum(col("VAL")).to_string(), "SUM(VAL)");
        assert_eq!(avg(col("VAL")).to_string(), "AVG(VAL)");
        assert_eq!(min(col("VAL")).to_string(), "MIN(VAL)");
        assert_eq!(max(col("VAL")).to_string(), "MAX(VAL)");
        assert_eq!(count(1).gt(2).to_string(), "COUNT(1) > 2");
    }

    #[test]
    fn test_generic_function() {
        assert_eq!(func("coalesce", [col("a"), lit(0)]).to_string(), "coalesce(a, 0)");
        assert_eq!(func("random", Vec::<Expr>::new()).to_string(), "random()");
        assert_eq!(
            func("substr", [col("s").concat("x"), lit(1)]).to_string(),
            "substr(s || 'x', 1)"
        );
    }

    #[test]
    fn test_cast() {
        assert_eq!(
            cast(col("my_int"), DataType::Decimal { precision: None, scale: None }).to_string(),
            "CAST (my_int AS DECIMAL)"
        );
        assert_eq!(cast(col("my_timestamp"), DataType::Date).to_string(), "CAST (my_timestamp AS DATE)");
        assert_eq!(
            cast(col("x").add(1), TypeName::new("TEXT")).to_string(),
            "CAST (x + 1 AS TEXT)"
        );
    }

    #[test]
    fn test_case_with_base() {
        let e = Case
            .of(col("CNT"))
            .when(0)
            .then("No")
            .when(1)
            .then("One")
            .else_("Some")
            .end();
        assert_eq!(
            e.to_string(),
            "CASE CNT WHEN 0 THEN 'No' WHEN 1 THEN 'One' ELSE 'Some' END"
        );
    }

    #[test]
    fn test_case_without_else() {
        let e = Case.when(col("x").isnull()).then(0).end();
        assert_eq!(e.to_string(), "CASE WHEN x ISNULL THEN 0 END");
        assert_eq!(e.add(1).to_string(), "CASE WHEN x ISNULL THEN 0 END + 1");
    }
}
