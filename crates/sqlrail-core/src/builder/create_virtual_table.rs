//! CREATE VIRTUAL TABLE statement builder.
//!
//! ```text
//! CREATE VIRTUAL TABLE [IF NOT EXISTS] [schema.]name USING module [( arg, ... )]
//! ```
//!
//! Module arguments are passed through as written.

use std::sync::Arc;

use crate::name::{Name, QualifiedName};
use crate::render::{SqlElement, Statement};

/// `CREATE VIRTUAL TABLE`, before the table name.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct VirtualTableStart {
    if_not_exists: bool,
}

impl VirtualTableStart {
    pub(crate) const fn new() -> Self {
        Self {
            if_not_exists: false,
        }
    }

    /// `... IF NOT EXISTS`
    pub fn if_not_exists(self) -> VirtualTableIfNotExists {
        VirtualTableIfNotExists(Self {
            if_not_exists: true,
        })
    }

    /// `... [schema.]name`
    pub fn name(self, name: impl Into<QualifiedName>) -> VirtualTableNamed {
        VirtualTableNamed {
            if_not_exists: self.if_not_exists,
            name: name.into(),
        }
    }
}

/// `CREATE VIRTUAL TABLE IF NOT EXISTS`, before the table name.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct VirtualTableIfNotExists(VirtualTableStart);

impl VirtualTableIfNotExists {
    /// `... [schema.]name`
    pub fn name(self, name: impl Into<QualifiedName>) -> VirtualTableNamed {
        self.0.name(name)
    }
}

/// `CREATE VIRTUAL TABLE name`, waiting for `USING`.
#[derive(Debug, Clone)]
#[must_use]
pub struct VirtualTableNamed {
    if_not_exists: bool,
    name: QualifiedName,
}

impl VirtualTableNamed {
    /// `... USING module`
    pub fn using(self, module: impl Into<Name>) -> CreateVirtualTable {
        CreateVirtualTable {
            head: self,
            module: module.into(),
        }
    }
}

/// `CREATE VIRTUAL TABLE name USING module`
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateVirtualTable {
    head: VirtualTableNamed,
    module: Name,
}

impl CreateVirtualTable {
    /// `...(arg, ...)`
    pub fn args<I>(self, args: I) -> VirtualTableWithArgs
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        VirtualTableWithArgs {
            table: self,
            args: args.into_iter().map(|arg| Arc::from(arg.as_ref())).collect(),
        }
    }
}

impl SqlElement for CreateVirtualTable {
    fn render_into(&self, buf: &mut String) {
        buf.push_str("CREATE VIRTUAL TABLE ");
        if self.head.if_not_exists {
            buf.push_str("IF NOT EXISTS ");
        }
        self.head.name.render_into(buf);
        buf.push_str(" USING ");
        self.module.render_into(buf);
    }
}

impl Statement for CreateVirtualTable {}

/// `CREATE VIRTUAL TABLE name USING module(arg, ...)`
#[derive(Debug, Clone)]
#[must_use]
pub struct VirtualTableWithArgs {
    table: CreateVirtualTable,
    args: Vec<Arc<str>>,
}

impl SqlElement for VirtualTableWithArgs {
    fn render_into(&self, buf: &mut String) {
        self.table.render_into(buf);
        buf.push('(');
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            buf.push_str(arg);
        }
        buf.push(')');
    }
}

impl Statement for VirtualTableWithArgs {}
