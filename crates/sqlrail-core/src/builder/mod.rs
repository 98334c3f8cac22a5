//! Statement builders.
//!
//! Each statement starts from a unit-struct keyword and moves through
//! typestate markers, so a clause method only exists where the clause may
//! legally appear. Only complete states implement
//! [`Statement`](crate::Statement).
//!
//! # Example
//!
//! ```rust
//! use sqlrail_core::builder::{table, JoinExt, Select};
//! use sqlrail_core::expr::{col_in, ExprTrait};
//! use sqlrail_core::Statement;
//!
//! let query = Select
//!     .columns([col_in("d", "dept_id"), col_in("e", "dept_id"), col_in("e", "name")])
//!     .unwrap()
//!     .from(
//!         table("DEPT")
//!             .alias_implicit("d")
//!             .join(table("EMPL").alias_implicit("e"), col_in("e", "dept_id").eq(col_in("d", "dept_id"))),
//!     );
//!
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT d.dept_id, e.dept_id, e.name FROM DEPT d JOIN EMPL e ON e.dept_id = d.dept_id"
//! );
//! ```

mod create_index;
mod create_table;
mod create_virtual_table;
mod drop_table;
mod savepoint;
pub(crate) mod select;
pub(crate) mod sequence;
mod vacuum;

use crate::expr::BindParameter;
use crate::render::SqlElement;

pub use create_index::{
    CreateIndex, IndexIfNotExists, IndexNamed, IndexStart, PartialIndex, UniqueIndex,
};
pub use create_table::{
    AcceptsTableOption, ColumnsOnly, Create, CreateTable, CreateTableAs, CreateTemp, TableBody,
    TableIfNotExists, TableNamed, TableOptions, TableStart, WithConstraints,
};
pub use create_virtual_table::{
    CreateVirtualTable, VirtualTableIfNotExists, VirtualTableNamed, VirtualTableStart,
    VirtualTableWithArgs,
};
pub use drop_table::{DropTable, DropTableIfExists, DropTableStatement};
pub use savepoint::{
    Release, ReleaseSavepoint, ReleaseStatement, Rollback, RollbackStatement, RollbackTo,
    RollbackToSavepoint, RollbackTransaction, Savepoint, SavepointStatement,
};
pub use select::{
    star, star_of, subquery_table, table, Complete, Compound, FetchPending, Fetchable, Fetched,
    Filtered, GroupFiltered, Groupable, Grouped, JoinExt, Limitable, Limited, Offset,
    OffsetUnit, Orderable, Projected, ResultColumn, Select, SelectCoreState, SelectHead,
    SelectModifier, SelectQuery, SelectStatement, Sorted, Sourced, TableItem, TableSpec, TableSuffix,
};
pub use sequence::{
    AcceptsCache, AcceptsCycle, AcceptsIncrement, AcceptsMaxValue, AcceptsMinValue, AcceptsStart,
    CreateSequence, Current, CurrentValue, DropSequence, DropSequenceIfExists,
    DropSequenceStatement, Next, NextValue, NextValues, SeqCached, SeqCycled, SeqIncremented,
    SeqMaxValue, SeqMinValue, SeqNamed, SeqStarted, SequenceDef, SequenceIfNotExists,
    SequenceValue,
};
pub use vacuum::{Vacuum, VacuumInto, VacuumSchema};

/// A count or value that is either an integer literal or a bind parameter.
///
/// Used by `LIMIT`, `OFFSET`, `FETCH` and the sequence options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// An integer literal.
    Int(i64),
    /// A bind parameter.
    Bind(BindParameter),
}

impl SqlElement for Param {
    fn render_into(&self, buf: &mut String) {
        match self {
            Self::Int(n) => buf.push_str(&n.to_string()),
            Self::Bind(param) => param.render_into(buf),
        }
    }
}

macro_rules! int_param {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Param {
                fn from(n: $ty) -> Self {
                    Self::Int(i64::from(n))
                }
            }
        )*
    };
}

int_param!(i8, i16, i32, i64, u8, u16, u32);

impl From<BindParameter> for Param {
    fn from(param: BindParameter) -> Self {
        Self::Bind(param)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;

    #[test]
    fn test_param_rendering() {
        assert_eq!(render(&Param::from(10)), "10");
        assert_eq!(render(&Param::from(-3_i64)), "-3");
        assert_eq!(render(&Param::from(BindParameter::named("n").unwrap())), ":n");
        assert_eq!(render(&Param::from(BindParameter::numbered(2))), "?2");
    }
}
