//! DROP TABLE statement builder: `DROP TABLE [IF EXISTS] [schema.]name`.

use crate::name::QualifiedName;
use crate::render::{SqlElement, Statement};

/// The `DROP TABLE` keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropTable;

impl DropTable {
    /// `DROP TABLE IF EXISTS`
    pub const fn if_exists(self) -> DropTableIfExists {
        DropTableIfExists
    }

    /// `DROP TABLE [schema.]name`
    pub fn name(self, name: impl Into<QualifiedName>) -> DropTableStatement {
        DropTableStatement {
            if_exists: false,
            name: name.into(),
        }
    }
}

/// `DROP TABLE IF EXISTS`, before the table name.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct DropTableIfExists;

impl DropTableIfExists {
    /// `... [schema.]name`
    pub fn name(self, name: impl Into<QualifiedName>) -> DropTableStatement {
        DropTableStatement {
            if_exists: true,
            name: name.into(),
        }
    }
}

/// A complete `DROP TABLE` statement.
#[derive(Debug, Clone)]
#[must_use]
pub struct DropTableStatement {
    if_exists: bool,
    name: QualifiedName,
}

impl SqlElement for DropTableStatement {
    fn render_into(&self, buf: &mut String) {
        buf.push_str(if self.if_exists {
            "DROP TABLE IF EXISTS "
        } else {
            "DROP TABLE "
        });
        self.name.render_into(buf);
    }
}

impl Statement for DropTableStatement {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_table() {
        assert_eq!(DropTable.name("t").to_sql(), "DROP TABLE t");
        assert_eq!(
            DropTable.if_exists().name(("main", "t")).to_sql(),
            "DROP TABLE IF EXISTS main.t"
        );
        assert_eq!(DropTable.name("my table").to_sql(), "DROP TABLE \"my table\"");
    }
}
