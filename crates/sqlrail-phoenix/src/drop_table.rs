//! Phoenix `DROP TABLE [IF EXISTS] ref [CASCADE]`.

use sqlrail_core::name::QualifiedName;
use sqlrail_core::render::{SqlElement, Statement};

/// The `DROP TABLE` keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropTable;

impl DropTable {
    /// `DROP TABLE IF EXISTS`
    pub const fn if_exists(self) -> DropTableIfExists {
        DropTableIfExists
    }

    /// `DROP TABLE ref`
    pub fn name(self, name: impl Into<QualifiedName>) -> DropTableStatement {
        DropTableStatement {
            if_exists: false,
            name: name.into(),
        }
    }
}

/// `DROP TABLE IF EXISTS`, waiting for the table reference.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct DropTableIfExists;

impl DropTableIfExists {
    /// `DROP TABLE IF EXISTS ref`
    pub fn name(self, name: impl Into<QualifiedName>) -> DropTableStatement {
        DropTableStatement {
            if_exists: true,
            name: name.into(),
        }
    }
}

/// `DROP TABLE [IF EXISTS] ref`
#[derive(Debug, Clone)]
#[must_use]
pub struct DropTableStatement {
    if_exists: bool,
    name: QualifiedName,
}

impl DropTableStatement {
    /// `... CASCADE`, also dropping the views built on the table.
    pub const fn cascade(self) -> DropTableCascade {
        DropTableCascade { table: self }
    }
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

/// `DROP TABLE [IF EXISTS] ref CASCADE`
#[derive(Debug, Clone)]
#[must_use]
pub struct DropTableCascade {
    table: DropTableStatement,
}

impl SqlElement for DropTableCascade {
    fn render_into(&self, buf: &mut String) {
        self.table.render_into(buf);
        buf.push_str(" CASCADE");
    }
}

impl Statement for DropTableCascade {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop() {
        assert_eq!(DropTable.name("my_table").to_sql(), "DROP TABLE my_table");
    }

    #[test]
    fn test_drop_cascade() {
        assert_eq!(
            DropTable.name(("my_schema", "my_table")).cascade().to_sql(),
            "DROP TABLE my_schema.my_table CASCADE"
        );
    }

    #[test]
    fn test_drop_if_exists() {
        assert_eq!(
            DropTable.if_exists().name("t").cascade().to_sql(),
            "DROP TABLE IF EXISTS t CASCADE"
        );
    }
}
