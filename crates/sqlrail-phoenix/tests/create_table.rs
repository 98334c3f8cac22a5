//! Phoenix DDL rendering through the public API.

use sqlrail_core::expr::{lit, BindParameter, IntoExpr};
use sqlrail_core::name::Name;
use sqlrail_core::types::DataType;
use sqlrail_core::{BuildError, Statement};
use sqlrail_phoenix::{
    column, constraint, family_column, key_column, ArrayExt, CreateTable, DropTable,
};

// ===================================================================
// CREATE TABLE
// ===================================================================

#[test]
fn metrics_table_with_composite_key() {
    let stmt = CreateTable
        .name(("stats", "prod_metrics"))
        .column(column("host").typed(DataType::Char(Some(50))).not_null())
        .column(column("created_date").typed(DataType::Date).not_null())
        .column(column("txn_count").typed(DataType::Bigint))
        .constraint(
            constraint("pk")
                .primary_key(["host", "created_date"])
                .unwrap(),
        );
    assert_eq!(
        stmt.to_sql(),
        "CREATE TABLE stats.prod_metrics (host CHAR(50) NOT NULL, created_date DATE NOT NULL, \
         txn_count BIGINT CONSTRAINT pk PRIMARY KEY(host, created_date))"
    );
}

#[test]
fn families_arrays_and_row_timestamp() {
    let stmt = CreateTable
        .if_not_exists()
        .name("web_stat")
        .column(column("host").typed(DataType::Char(Some(2))).not_null())
        .column(column("created").typed(DataType::Timestamp).not_null())
        .column(family_column("usage", "core").typed(DataType::Bigint))
        .column(family_column("usage", "tags").typed(DataType::Varchar(None).array().dimension(5)))
        .constraint(
            constraint("pk")
                .primary_key([
                    key_column("host").into(),
                    key_column("created").desc().row_timestamp(),
                ])
                .unwrap(),
        )
        .option("SALT_BUCKETS=8")
        .option("TTL=86400");
    assert_eq!(
        stmt.to_sql(),
        "CREATE TABLE IF NOT EXISTS web_stat (host CHAR(2) NOT NULL, created TIMESTAMP NOT NULL, \
         usage.core BIGINT, usage.tags VARCHAR ARRAY[5] \
         CONSTRAINT pk PRIMARY KEY(host, created DESC ROW_TIMESTAMP)) SALT_BUCKETS=8, TTL=86400"
    );
}

#[test]
fn split_points_after_options() {
    let stmt = CreateTable
        .name(Name::quoted("events"))
        .column(column(Name::quoted("id")).typed(DataType::Char(Some(10))).not_null().primary_key())
        .option("VERSIONS=5")
        .split_on([
            lit("a"),
            BindParameter::named("mid").unwrap().into_expr(),
            lit(42),
        ])
        .unwrap();
    assert_eq!(
        stmt.to_sql(),
        "CREATE TABLE \"events\" (\"id\" CHAR(10) NOT NULL PRIMARY KEY) VERSIONS=5 \
         SPLIT ON('a', :mid, 42)"
    );
}

#[test]
fn rendering_is_repeatable() {
    let base = CreateTable
        .name("t")
        .column(column("a").typed(DataType::Integer).not_null().primary_key());
    let with_ttl = base.clone().option("TTL=60");
    let with_versions = base.clone().option("VERSIONS=1");
    assert_eq!(base.to_sql(), "CREATE TABLE t (a INTEGER NOT NULL PRIMARY KEY)");
    assert_eq!(with_ttl.to_sql(), "CREATE TABLE t (a INTEGER NOT NULL PRIMARY KEY) TTL=60");
    assert_eq!(with_ttl.to_sql(), with_ttl.to_sql());
    assert_eq!(
        with_versions.to_sql(),
        "CREATE TABLE t (a INTEGER NOT NULL PRIMARY KEY) VERSIONS=1"
    );
}

#[test]
fn empty_lists_are_rejected() {
    let err = CreateTable
        .name("t")
        .column(column("a").typed(DataType::Integer))
        .split_on(Vec::<BindParameter>::new())
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::InsufficientOperands {
            construct: "split points",
            required: 1,
            given: 0,
        }
    );
    assert!(constraint("pk").primary_key(Vec::<&str>::new()).is_err());
}

// ===================================================================
// DROP TABLE
// ===================================================================

#[test]
fn drop_variants() {
    assert_eq!(
        DropTable.name(("my_schema", "my_table")).cascade().to_sql(),
        "DROP TABLE my_schema.my_table CASCADE"
    );
    assert_eq!(
        DropTable.if_exists().name("my_table").to_sql(),
        "DROP TABLE IF EXISTS my_table"
    );
}
