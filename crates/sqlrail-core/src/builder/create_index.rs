//! CREATE INDEX statement builder.
//!
//! ```text
//! CREATE [UNIQUE] INDEX [IF NOT EXISTS] [schema.]name
//!     ON table ( indexed-column, ... ) [WHERE expr]
//! ```

use crate::definition::IndexedColumn;
use crate::error::{collect_at_least, Result};
use crate::expr::{Expr, IntoExpr};
use crate::name::{Name, QualifiedName};
use crate::render::{render_paren_list, SqlElement, Statement};

/// `CREATE UNIQUE`, waiting for `INDEX`.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct UniqueIndex;

impl UniqueIndex {
    /// `CREATE UNIQUE INDEX`
    pub fn index(self) -> IndexStart {
        IndexStart::new(true)
    }
}

/// `CREATE [UNIQUE] INDEX`, before the index name.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct IndexStart {
    unique: bool,
    if_not_exists: bool,
}

impl IndexStart {
    pub(crate) const fn new(unique: bool) -> Self {
        Self {
            unique,
            if_not_exists: false,
        }
    }

    /// `... IF NOT EXISTS`
    pub fn if_not_exists(self) -> IndexIfNotExists {
        IndexIfNotExists(Self {
            if_not_exists: true,
            ..self
        })
    }

    /// `... [schema.]name`
    pub fn name(self, name: impl Into<QualifiedName>) -> IndexNamed {
        IndexNamed {
            unique: self.unique,
            if_not_exists: self.if_not_exists,
            name: name.into(),
        }
    }
}

/// `CREATE INDEX IF NOT EXISTS`, before the index name.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct IndexIfNotExists(IndexStart);

impl IndexIfNotExists {
    /// `... [schema.]name`
    pub fn name(self, name: impl Into<QualifiedName>) -> IndexNamed {
        self.0.name(name)
    }
}

/// `CREATE INDEX name`, waiting for `ON`.
#[derive(Debug, Clone)]
#[must_use]
pub struct IndexNamed {
    unique: bool,
    if_not_exists: bool,
    name: QualifiedName,
}

impl IndexNamed {
    /// `... ON table (column, ...)`
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::InsufficientOperands`] for an empty
    /// column list.
    pub fn on<I>(self, table: impl Into<Name>, columns: I) -> Result<CreateIndex>
    where
        I: IntoIterator,
        I::Item: Into<IndexedColumn>,
    {
        let columns = collect_at_least("index", 1, columns.into_iter().map(Into::into))?;
        Ok(CreateIndex {
            head: self,
            table: table.into(),
            columns,
        })
    }
}

/// `CREATE INDEX name ON table (...)`
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateIndex {
    head: IndexNamed,
    table: Name,
    columns: Vec<IndexedColumn>,
}

impl CreateIndex {
    /// `... WHERE condition`, making a partial index.
    pub fn where_clause(self, condition: impl IntoExpr) -> PartialIndex {
        PartialIndex {
            index: self,
            condition: condition.into_expr(),
        }
    }
}

impl SqlElement for CreateIndex {
    fn render_into(&self, buf: &mut String) {
        buf.push_str(if self.head.unique {
            "CREATE UNIQUE INDEX "
        } else {
            "CREATE INDEX "
        });
        if self.head.if_not_exists {
            buf.push_str("IF NOT EXISTS ");
        }
        self.head.name.render_into(buf);
        buf.push_str(" ON ");
        self.table.render_into(buf);
        render_paren_list(&self.columns, buf);
    }
}

impl Statement for CreateIndex {}

/// `CREATE INDEX ... WHERE condition`
#[derive(Debug, Clone)]
#[must_use]
pub struct PartialIndex {
    index: CreateIndex,
    condition: Expr,
}

impl SqlElement for PartialIndex {
    fn render_into(&self, buf: &mut String) {
        self.index.render_into(buf);
        buf.push_str(" WHERE ");
        self.condition.render_into(buf);
    }
}

impl Statement for PartialIndex {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Create;
    use crate::definition::column;
    use crate::error::BuildError;
    use crate::expr::{col, ExprTrait};

    #[test]
    fn test_simple_index() {
        let stmt = Create.index().name("idx").on("t", ["a"]).unwrap();
        assert_eq!(stmt.to_sql(), "CREATE INDEX idx ON t (a)");
    }

    #[test]
    fn test_unique_if_not_exists() {
        let stmt = Create
            .unique()
            .index()
            .if_not_exists()
            .name(("main", "idx"))
            .on("t", [column("a").asc(), column("b").desc()])
            .unwrap();
        assert_eq!(
            stmt.to_sql(),
            "CREATE UNIQUE INDEX IF NOT EXISTS main.idx ON t (a ASC, b DESC)"
        );
    }

    #[test]
    fn test_partial_and_expression_index() {
        let stmt = Create
            .index()
            .name("idx")
            .on("t", [IndexedColumn::from(col("a").add(col("b"))).collate("BINARY")])
            .unwrap()
            .where_clause(col("a").not_null());
        assert_eq!(
            stmt.to_sql(),
            "CREATE INDEX idx ON t ((a + b) COLLATE BINARY) WHERE a NOT NULL"
        );
    }

    #[test]
    fn test_empty_column_list_is_rejected() {
        let err = Create.index().name("idx").on("t", Vec::<&str>::new()).unwrap_err();
        assert_eq!(
            err,
            BuildError::InsufficientOperands {
                construct: "index",
                required: 1,
                given: 0
            }
        );
    }
}
