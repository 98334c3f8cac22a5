//! # sqlrail-phoenix
//!
//! Apache Phoenix extensions for `sqlrail-core`: DDL, array subscripts and
//! table references in `FROM`.
//!
//! # How Phoenix differs from SQLite
//!
//! - **Column families**: a column reference may be prefixed by its
//!   family, as in `m.response_time`.
//! - **Fixed clause order**: a column reads
//!   `ref type [NULL | NOT NULL] [DEFAULT v] [PRIMARY KEY [ASC | DESC] [ROW_TIMESTAMP]]`,
//!   and each clause is only reachable from the ones before it.
//! - **Composite keys**: `CONSTRAINT name PRIMARY KEY(...)` follows the last
//!   column after a space, with no comma.
//! - **Table options**: opaque `KEY=value` pairs such as `TTL=86400` or
//!   `SALT_BUCKETS=8`.
//! - **Pre-splitting**: `SPLIT ON(point, ...)`.
//! - **Arrays**: `type ARRAY`, `type ARRAY[]`, `type ARRAY[n]`.
//! - **Cascading drops**: `DROP TABLE ref CASCADE`.
//! - **Array subscripts**: `tags[1]`, with indexes starting at 1.
//! - **Case-insensitive matching**: `name ILIKE 'j%'`, through
//!   [`sqlrail_core::expr::ExprTrait::ilike`].
//! - **Dynamic columns**: `EventLog(lastGCTime TIME)` declares columns for
//!   a single query.
//! - **Sampling**: `PERSON TABLESAMPLE(0.5)`.
//!
//! Names, literals, bind parameters and the `SELECT` builder come from
//! `sqlrail-core` unchanged.
//!
//! ## Example
//!
//! ```rust
//! use sqlrail_core::types::DataType;
//! use sqlrail_core::Statement;
//! use sqlrail_phoenix::{column, constraint, CreateTable};
//!
//! let stmt = CreateTable
//!     .name(("stats", "prod_metrics"))
//!     .column(column("host").typed(DataType::Char(Some(50))).not_null())
//!     .column(column("created_date").typed(DataType::Date).not_null())
//!     .column(column("txn_count").typed(DataType::Bigint))
//!     .constraint(constraint("pk").primary_key(["host", "created_date"])?);
//!
//! assert_eq!(
//!     stmt.to_sql(),
//!     "CREATE TABLE stats.prod_metrics (host CHAR(50) NOT NULL, \
//!      created_date DATE NOT NULL, txn_count BIGINT \
//!      CONSTRAINT pk PRIMARY KEY(host, created_date))"
//! );
//! # Ok::<(), sqlrail_core::BuildError>(())
//! ```
//!
//! ```compile_fail
//! use sqlrail_core::types::DataType;
//! use sqlrail_phoenix::{column, CreateTable};
//!
//! // Options close the column list.
//! let _ = CreateTable
//!     .name("t")
//!     .column(column("a").typed(DataType::Integer))
//!     .option("TTL=86400")
//!     .column(column("b").typed(DataType::Integer));
//! ```

pub mod column;
pub mod constraint;
pub mod create_table;
pub mod drop_table;
pub mod expr;
pub mod table_ref;
pub mod types;

pub use column::{column, family_column, ColumnDef, ColumnRef, PhoenixColumn};
pub use constraint::{constraint, key_column, KeyColumn, PrimaryKeyConstraint};
pub use create_table::{CreateTable, CreateTableStatement};
pub use drop_table::DropTable;
pub use expr::ArrayElement;
pub use table_ref::{DynamicTable, SampledTable, TableItemExt};
pub use types::{ArrayExt, PhoenixType};
