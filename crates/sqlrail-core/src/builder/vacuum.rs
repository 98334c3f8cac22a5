//! `VACUUM [schema] [INTO file]`
//!
//! The file is an expression; a plain string becomes a string literal.

use crate::expr::{Expr, IntoExpr};
use crate::name::Name;
use crate::render::{SqlElement, Statement};

/// The `VACUUM` keyword; complete on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vacuum;

impl Vacuum {
    /// `VACUUM schema`
    pub fn schema(self, schema: impl Into<Name>) -> VacuumSchema {
        VacuumSchema {
            schema: schema.into(),
        }
    }

    /// `VACUUM INTO file`
    pub fn into_file(self, file: impl IntoExpr) -> VacuumInto {
        VacuumInto {
            schema: None,
            file: file.into_expr(),
        }
    }
}

impl SqlElement for Vacuum {
    fn render_into(&self, buf: &mut String) {
        buf.push_str("VACUUM");
    }
}

impl Statement for Vacuum {}

/// `VACUUM schema`
#[derive(Debug, Clone)]
#[must_use]
pub struct VacuumSchema {
    schema: Name,
}

impl VacuumSchema {
    /// `VACUUM schema INTO file`
    pub fn into_file(self, file: impl IntoExpr) -> VacuumInto {
        VacuumInto {
            schema: Some(self.schema),
            file: file.into_expr(),
        }
    }
}

impl SqlElement for VacuumSchema {
    fn render_into(&self, buf: &mut String) {
        buf.push_str("VACUUM ");
        self.schema.render_into(buf);
    }
}

impl Statement for VacuumSchema {}

/// `VACUUM [schema] INTO file`
#[derive(Debug, Clone)]
#[must_use]
pub struct VacuumInto {
    schema: Option<Name>,
    file: Expr,
}

impl SqlElement for VacuumInto {
    fn render_into(&self, buf: &mut String) {
        buf.push_str("VACUUM");
        if let Some(schema) = &self.schema {
            buf.push(' ');
            schema.render_into(buf);
        }
        buf.push_str(" INTO ");
        self.file.render_into(buf);
    }
}

impl Statement for VacuumInto {}
