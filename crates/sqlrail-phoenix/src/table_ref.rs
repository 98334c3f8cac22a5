//! Phoenix table references in `FROM`.
//!
//! ```text
//! table [[AS] alias] [(column TYPE, ...)] [TABLESAMPLE(fraction)]
//! ```
//!
//! Dynamic columns declare, for one query, columns that are not part of the
//! table's schema. They follow the alias without a space.
//!
//! ```compile_fail
//! use sqlrail_core::builder::table;
//! use sqlrail_core::types::DataType;
//! use sqlrail_phoenix::{column, TableItemExt};
//!
//! // Dynamic columns cannot follow TABLESAMPLE.
//! let _ = table("t").tablesample(0.5).dynamic_columns([column("a").typed(DataType::Integer)]);
//! ```

use sqlrail_core::builder::{TableItem, TableSpec};
use sqlrail_core::error::{collect_at_least, Result};
use sqlrail_core::expr::lit;
use sqlrail_core::render::{render_comma_list, SqlElement};

use crate::column::PhoenixColumn;

#[derive(Debug, Clone)]
struct DynamicColumns(Vec<PhoenixColumn>);

impl SqlElement for DynamicColumns {
    fn render_into(&self, buf: &mut String) {
        buf.push('(');
        render_comma_list(&self.0, buf);
        buf.push(')');
    }
}

#[derive(Debug, Clone, Copy)]
struct TableSample(f64);

impl SqlElement for TableSample {
    fn render_into(&self, buf: &mut String) {
        buf.push_str(" TABLESAMPLE(");
        lit(self.0).render_into(buf);
        buf.push(')');
    }
}

fn sample(item: TableItem, fraction: f64) -> SampledTable {
    SampledTable(item.suffix(TableSample(fraction)))
}

/// Phoenix clauses on a table item.
pub trait TableItemExt: Into<TableItem> {
    /// `table(column TYPE, ...)`
    ///
    /// # Errors
    ///
    /// Returns [`sqlrail_core::BuildError::InsufficientOperands`] for an
    /// empty list.
    fn dynamic_columns<I>(self, columns: I) -> Result<DynamicTable>
    where
        I: IntoIterator,
        I::Item: Into<PhoenixColumn>,
    {
        let columns = collect_at_least("dynamic columns", 1, columns.into_iter().map(Into::into))?;
        Ok(DynamicTable(self.into().suffix(DynamicColumns(columns))))
    }

    /// `table TABLESAMPLE(fraction)`
    fn tablesample(self, fraction: f64) -> SampledTable {
        sample(self.into(), fraction)
    }
}

impl TableItemExt for TableItem {}

/// A table item with dynamic columns, which may still be sampled.
#[derive(Debug, Clone)]
#[must_use]
pub struct DynamicTable(TableItem);

impl DynamicTable {
    /// `... TABLESAMPLE(fraction)`
    pub fn tablesample(self, fraction: f64) -> SampledTable {
        sample(self.0, fraction)
    }
}

/// A sampled table item; nothing may follow.
#[derive(Debug, Clone)]
#[must_use]
pub struct SampledTable(TableItem);

impl From<DynamicTable> for TableItem {
    fn from(table: DynamicTable) -> Self {
        table.0
    }
}

impl From<SampledTable> for TableItem {
    fn from(table: SampledTable) -> Self {
        table.0
    }
}

impl From<DynamicTable> for TableSpec {
    fn from(table: DynamicTable) -> Self {
        table.0.into()
    }
}

impl From<SampledTable> for TableSpec {
    fn from(table: SampledTable) -> Self {
        table.0.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlrail_core::builder::{table, JoinExt, Select};
    use sqlrail_core::expr::{col_in, ExprTrait};
    use sqlrail_core::render::render;
    use sqlrail_core::types::DataType;
    use sqlrail_core::{BuildError, Statement};

    use crate::column::{column, family_column};

    #[test]
    fn test_dynamic_columns() {
        let item = table("EventLog")
            .dynamic_columns([
                column("lastGCTime").typed(DataType::Time),
                family_column("f", "usage").typed(DataType::Bigint),
            ])
            .unwrap();
        assert_eq!(
            render(&TableItem::from(item)),
            "EventLog(lastGCTime TIME, f.usage BIGINT)"
        );
    }

    #[test]
    fn test_dynamic_columns_after_alias() {
        let item = table(("s", "t"))
            .alias("x")
            .dynamic_columns([column("c").typed(DataType::Integer)])
            .unwrap();
        assert_eq!(render(&TableItem::from(item)), "s.t AS x(c INTEGER)");
    }

    #[test]
    fn test_tablesample() {
        assert_eq!(
            render(&TableItem::from(table("PERSON").tablesample(0.5))),
            "PERSON TABLESAMPLE(0.5)"
        );
        assert_eq!(
            render(&TableItem::from(table("PERSON").alias_implicit("p").tablesample(12.08))),
            "PERSON p TABLESAMPLE(12.08)"
        );
    }

    #[test]
    fn test_dynamic_columns_then_tablesample_in_query() {
        let query = Select.star().from(
            table("t")
                .dynamic_columns([column("extra").typed(DataType::Varchar(Some(10)))])
                .unwrap()
                .tablesample(1.0)
                .join(table("u"), col_in("t", "id").eq(col_in("u", "id"))),
        );
        assert_eq!(
            query.to_sql(),
            "SELECT * FROM t(extra VARCHAR(10)) TABLESAMPLE(1.0) JOIN u ON t.id = u.id"
        );
    }

    #[test]
    fn test_empty_dynamic_columns_are_rejected() {
        let err = table("t")
            .dynamic_columns(Vec::<PhoenixColumn>::new())
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::InsufficientOperands {
                construct: "dynamic columns",
                required: 1,
                given: 0,
            }
        );
    }
}
