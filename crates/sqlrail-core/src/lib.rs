//! # sqlrail-core
//!
//! A typestate SQL statement builder following SQLite's syntax diagrams.
//!
//! This crate provides:
//! - An expression grammar with automatic, minimal parenthesization
//! - Column, table-constraint and index definitions
//! - Statement builders for CREATE TABLE, CREATE INDEX, CREATE VIRTUAL
//!   TABLE, DROP TABLE, SELECT, sequences, savepoints and VACUUM
//!
//! ## Type-Safe SQL Building
//!
//! Every call returns a new immutable value whose methods are exactly the
//! clauses that may legally come next, so an invalid statement does not
//! compile:
//!
//! ```rust
//! use sqlrail_core::prelude::*;
//!
//! let stmt = Create
//!     .table()
//!     .if_not_exists()
//!     .name("users")
//!     .column(column("id").typed(DataType::Integer).primary_key().autoincrement())
//!     .column(column("email").typed(DataType::Text).not_null().unique())
//!     .column(column("created").typed(DataType::Timestamp).default_value(current_timestamp()));
//!
//! assert_eq!(
//!     stmt.to_sql(),
//!     "CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY AUTOINCREMENT, \
//!      email TEXT NOT NULL UNIQUE, created TIMESTAMP DEFAULT CURRENT_TIMESTAMP)"
//! );
//! ```
//!
//! ```compile_fail
//! use sqlrail_core::prelude::*;
//!
//! // A column definition accepts its type only once, before any constraint.
//! let _ = column("id").typed(DataType::Integer).not_null().typed(DataType::Text);
//! ```
//!
//! ## Expressions
//!
//! Strings in expression position are literals; identifiers come from
//! [`expr::col`]:
//!
//! ```rust
//! use sqlrail_core::prelude::*;
//!
//! let query = Select
//!     .star()
//!     .from(table("users"))
//!     .where_clause(col("name").eq("O'Brien").or(col("id").lt(10)).and(col("active")));
//!
//! assert_eq!(
//!     query.to_sql(),
//!     "SELECT * FROM users WHERE (name = 'O''Brien' OR id < 10) AND active"
//! );
//! ```
//!
//! Values supplied at execution time use [`expr::BindParameter`].

pub mod builder;
pub mod definition;
pub mod error;
pub mod expr;
pub mod name;
pub mod render;
pub mod types;
pub mod value;

pub use error::{collect_at_least, BuildError, Result};
pub use render::{render, SqlElement, Statement};

/// Everything needed to build statements, for glob import.
pub mod prelude {
    pub use crate::builder::{
        star, star_of, subquery_table, table, Create, CreateSequence, Current, DropSequence,
        DropTable, JoinExt, Next, Param, Release, Rollback, Savepoint, Select, Vacuum,
    };
    pub use crate::definition::{
        check, column, constraint, foreign_key, primary_key, primary_key_autoincrement, unique,
        ColumnConstraints, ForeignKeyAction, IndexedColumn,
    };
    pub use crate::expr::{
        all, any, avg, bit_not, cast, col, col_in, count, count_distinct, count_star,
        current_date, current_time, current_timestamp, exists, func, lit, max, min, neg, not,
        not_exists, null, pos, row, subquery, sum, BindParameter, Case, Expr, ExprTrait,
        IntoExpr,
    };
    pub use crate::name::{Name, QualifiedName};
    pub use crate::types::{DataType, TypeName};
    pub use crate::{BuildError, Result, SqlElement, Statement};
}
