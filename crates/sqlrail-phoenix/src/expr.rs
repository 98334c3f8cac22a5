//! Phoenix expression syntax.
//!
//! `ILIKE` and `NOT ILIKE` live on [`sqlrail_core::expr::ExprTrait`];
//! array subscripts are added here.

use sqlrail_core::expr::{subscript, Expr, IntoExpr};

/// Array element access.
pub trait ArrayElement: IntoExpr + Sized {
    /// `array[index]`; Phoenix array indexes start at 1.
    fn at(self, index: impl IntoExpr) -> Expr {
        subscript(self, index)
    }
}

impl ArrayElement for Expr {}
