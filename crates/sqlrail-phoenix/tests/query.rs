//! Phoenix query syntax through the public API.

use sqlrail_core::builder::{table, JoinExt, Select};
use sqlrail_core::expr::{col, col_in, lit, BindParameter, ExprTrait};
use sqlrail_core::types::DataType;
use sqlrail_core::Statement;
use sqlrail_phoenix::{column, family_column, ArrayElement, TableItemExt};

// ===================================================================
// Expressions
// ===================================================================

#[test]
fn array_subscripts_and_ilike() {
    let query = Select
        .column(col("tags").at(1))
        .from(table("web_stat"))
        .where_clause(
            col("host")
                .ilike(lit("east%"))
                .and(col("tags").at(BindParameter::anonymous()).not_ilike(lit("%test%"))),
        );
    assert_eq!(
        query.to_sql(),
        "SELECT tags[1] FROM web_stat WHERE host ILIKE 'east%' AND tags[?] NOT ILIKE '%test%'"
    );
}

// ===================================================================
// Table references
// ===================================================================

#[test]
fn dynamic_columns_and_sampling() {
    let events = table("EventLog")
        .alias("e")
        .dynamic_columns([
            column("lastGCTime").typed(DataType::Time),
            family_column("f", "usage").typed(DataType::Bigint),
        ])
        .unwrap()
        .tablesample(0.25);
    let query = Select
        .column(col_in("e", "lastGCTime"))
        .from(events.join(table("Hosts").alias("h"), col_in("e", "host").eq(col_in("h", "host"))));
    assert_eq!(
        query.to_sql(),
        "SELECT e.lastGCTime FROM EventLog AS e(lastGCTime TIME, f.usage BIGINT) \
         TABLESAMPLE(0.25) JOIN Hosts AS h ON e.host = h.host"
    );
}

#[test]
fn sampled_table_is_a_plain_from_source() {
    let query = Select.star().from(table(("s", "PERSON")).tablesample(0.5));
    assert_eq!(query.to_sql(), "SELECT * FROM s.PERSON TABLESAMPLE(0.5)");
}
