//! Savepoint statements.
//!
//! ```text
//! SAVEPOINT name
//! RELEASE [SAVEPOINT] name
//! ROLLBACK [TRANSACTION] [TO [SAVEPOINT] name]
//! ```

use crate::name::Name;
use crate::render::{SqlElement, Statement};

/// The `SAVEPOINT` keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct Savepoint;

impl Savepoint {
    /// `SAVEPOINT name`
    pub fn name(self, name: impl Into<Name>) -> SavepointStatement {
        SavepointStatement { name: name.into() }
    }
}

/// A complete `SAVEPOINT name` statement.
#[derive(Debug, Clone)]
#[must_use]
pub struct SavepointStatement {
    name: Name,
}

impl SqlElement for SavepointStatement {
    fn render_into(&self, buf: &mut String) {
        buf.push_str("SAVEPOINT ");
        self.name.render_into(buf);
    }
}

impl Statement for SavepointStatement {}

/// The `RELEASE` keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct Release;

impl Release {
    /// `RELEASE SAVEPOINT`
    pub const fn savepoint(self) -> ReleaseSavepoint {
        ReleaseSavepoint
    }

    /// `RELEASE name`
    pub fn name(self, name: impl Into<Name>) -> ReleaseStatement {
        ReleaseStatement {
            savepoint_keyword: false,
            name: name.into(),
        }
    }
}

/// `RELEASE SAVEPOINT`, waiting for the name.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct ReleaseSavepoint;

impl ReleaseSavepoint {
    /// `RELEASE SAVEPOINT name`
    pub fn name(self, name: impl Into<Name>) -> ReleaseStatement {
        ReleaseStatement {
            savepoint_keyword: true,
            name: name.into(),
        }
    }
}

/// A complete `RELEASE` statement.
#[derive(Debug, Clone)]
#[must_use]
pub struct ReleaseStatement {
    savepoint_keyword: bool,
    name: Name,
}

impl SqlElement for ReleaseStatement {
    fn render_into(&self, buf: &mut String) {
        buf.push_str(if self.savepoint_keyword {
            "RELEASE SAVEPOINT "
        } else {
            "RELEASE "
        });
        self.name.render_into(buf);
    }
}

impl Statement for ReleaseStatement {}

/// The `ROLLBACK` keyword; complete on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rollback;

impl Rollback {
    /// `ROLLBACK TRANSACTION`
    pub const fn transaction(self) -> RollbackTransaction {
        RollbackTransaction
    }

    /// `ROLLBACK TO`
    pub fn to(self) -> RollbackTo {
        RollbackTo { transaction: false }
    }
}

impl SqlElement for Rollback {
    fn render_into(&self, buf: &mut String) {
        buf.push_str("ROLLBACK");
    }
}

impl Statement for Rollback {}

/// `ROLLBACK TRANSACTION`; complete on its own.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct RollbackTransaction;

impl RollbackTransaction {
    /// `ROLLBACK TRANSACTION TO`
    pub fn to(self) -> RollbackTo {
        RollbackTo { transaction: true }
    }
}

impl SqlElement for RollbackTransaction {
    fn render_into(&self, buf: &mut String) {
        buf.push_str("ROLLBACK TRANSACTION");
    }
}

impl Statement for RollbackTransaction {}

/// `ROLLBACK [TRANSACTION] TO`, waiting for the savepoint.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct RollbackTo {
    transaction: bool,
}

impl RollbackTo {
    /// `... TO SAVEPOINT`
    pub fn savepoint(self) -> RollbackToSavepoint {
        RollbackToSavepoint(self)
    }

    /// `... TO name`
    pub fn name(self, name: impl Into<Name>) -> RollbackStatement {
        RollbackStatement {
            transaction: self.transaction,
            savepoint_keyword: false,
            name: name.into(),
        }
    }
}

/// `ROLLBACK [TRANSACTION] TO SAVEPOINT`, waiting for the name.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct RollbackToSavepoint(RollbackTo);

impl RollbackToSavepoint {
    /// `... TO SAVEPOINT name`
    pub fn name(self, name: impl Into<Name>) -> RollbackStatement {
        RollbackStatement {
            transaction: self.0.transaction,
            savepoint_keyword: true,
            name: name.into(),
        }
    }
}

/// A complete `ROLLBACK ... TO ...` statement.
#[derive(Debug, Clone)]
#[must_use]
pub struct RollbackStatement {
    transaction: bool,
    savepoint_keyword: bool,
    name: Name,
}

impl SqlElement for RollbackStatement {
    fn render_into(&self, buf: &mut String) {
        buf.push_str(if self.transaction {
            "ROLLBACK TRANSACTION TO "
        } else {
            "ROLLBACK TO "
        });
        if self.savepoint_keyword {
            buf.push_str("SAVEPOINT ");
        }
        self.name.render_into(buf);
    }
}

impl Statement for RollbackStatement {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_savepoint() {
        assert_eq!(Savepoint.name("a").to_sql(), "SAVEPOINT a");
        assert_eq!(Savepoint.name("a\"").to_sql(), "SAVEPOINT \"a\"\"\"");
    }

    #[test]
    fn test_release() {
        assert_eq!(Release.name("a").to_sql(), "RELEASE a");
        assert_eq!(Release.savepoint().name("a").to_sql(), "RELEASE SAVEPOINT a");
        assert_eq!(
            Release.savepoint().name("a\"").to_sql(),
            "RELEASE SAVEPOINT \"a\"\"\""
        );
    }

    #[test]
    fn test_rollback() {
        assert_eq!(Rollback.to_sql(), "ROLLBACK");
        assert_eq!(Rollback.transaction().to_sql(), "ROLLBACK TRANSACTION");
        assert_eq!(Rollback.to().name("a").to_sql(), "ROLLBACK TO a");
        assert_eq!(Rollback.to().name("a\"").to_sql(), "ROLLBACK TO \"a\"\"\"");
        assert_eq!(Rollback.to().savepoint().name("a").to_sql(), "ROLLBACK TO SAVEPOINT a");
        assert_eq!(
            Rollback.transaction().to().name("a").to_sql(),
            "ROLLBACK TRANSACTION TO a"
        );
        assert_eq!(
            Rollback.transaction().to().savepoint().name("a").to_sql(),
            "ROLLBACK TRANSACTION TO SAVEPOINT a"
        );
    }
}
