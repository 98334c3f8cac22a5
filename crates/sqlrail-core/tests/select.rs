//! SELECT rendering tests.

use sqlrail_core::builder::SelectQuery;
use sqlrail_core::prelude::*;

fn dept_join_query() -> impl Statement {
    Select
        .columns([
            col_in("d", "dept_id"),
            col_in("e", "dept_id"),
            col_in("e", "name"),
        ])
        .unwrap()
        .from(table("DEPT").alias_implicit("d").join(
            table("EMPL").alias_implicit("e"),
            col_in("e", "dept_id").eq(col_in("d", "dept_id")),
        ))
}

// ===================================================================
// Joins
// ===================================================================

#[test]
fn select_with_join() {
    assert_eq!(
        dept_join_query().to_sql(),
        "SELECT d.dept_id, e.dept_id, e.name FROM DEPT d JOIN EMPL e ON e.dept_id = d.dept_id"
    );
}

#[test]
fn select_with_join_renders_the_same_twice() {
    let query = dept_join_query();
    let first = query.to_sql();
    assert_eq!(first, query.to_sql());
}

#[test]
fn chained_outer_joins() {
    let from = table("a")
        .left_join(table("b"), col_in("b", "a_id").eq(col_in("a", "id")))
        .right_outer_join("c", col_in("c", "b_id").eq(col_in("b", "id")));
    assert_eq!(
        Select.star().from(from).to_sql(),
        "SELECT * FROM a LEFT JOIN b ON b.a_id = a.id RIGHT OUTER JOIN c ON c.b_id = b.id"
    );
}

// ===================================================================
// Clause ordering
// ===================================================================

#[test]
fn full_clause_sequence() {
    let query = Select
        .hint("FULL(e)")
        .distinct()
        .column(col("dept").alias("department"))
        .column(count_star().alias("headcount"))
        .from(table("emp").alias("e"))
        .where_clause(col("active").and(col("salary").gt(BindParameter::named("min").unwrap())))
        .group_by([col("dept")])
        .unwrap()
        .having(count_star().gt_eq(3))
        .order_by([col("headcount").desc().nulls_last()])
        .unwrap()
        .limit(10)
        .offset(20);
    assert_eq!(
        query.to_sql(),
        "SELECT /*+ FULL(e) */ DISTINCT dept AS department, COUNT(*) AS headcount \
         FROM emp AS e WHERE active AND salary > :min GROUP BY dept \
         HAVING COUNT(*) >= 3 ORDER BY headcount DESC NULLS LAST LIMIT 10 OFFSET 20"
    );
}

#[test]
fn group_by_requires_an_expression() {
    let err = Select
        .star()
        .from(table("t"))
        .group_by(Vec::<Expr>::new())
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::InsufficientOperands {
            construct: "group by",
            required: 1,
            given: 0,
        }
    );
}

#[test]
fn union_all_cores() {
    let query = Select
        .column(col("id"))
        .from(table("a"))
        .union_all(Select.column(col("id")).from(table("b")))
        .order_by([col("id")])
        .unwrap();
    assert_eq!(
        query.to_sql(),
        "SELECT id FROM a UNION ALL SELECT id FROM b ORDER BY id"
    );
}

#[test]
fn offset_fetch_variant() {
    let query = Select
        .star()
        .from(table("t"))
        .limit(5)
        .offset(BindParameter::numbered(1))
        .row()
        .fetch_first(1)
        .row_only();
    assert_eq!(
        query.to_sql(),
        "SELECT * FROM t LIMIT 5 OFFSET ?1 ROW FETCH FIRST 1 ROW ONLY"
    );
}

// ===================================================================
// Subqueries
// ===================================================================

#[test]
fn nested_subqueries() {
    let managers: SelectQuery = Select
        .column(col("manager_id"))
        .from(table("emp"))
        .where_clause(col("manager_id").is_not(null()))
        .into();
    let query = Select
        .column(col("name"))
        .from(table("emp"))
        .where_clause(
            col("id")
                .in_select(managers.clone())
                .or(not_exists(managers)),
        );
    assert_eq!(
        query.to_sql(),
        "SELECT name FROM emp WHERE id IN (SELECT manager_id FROM emp WHERE manager_id IS NOT NULL) \
         OR NOT EXISTS (SELECT manager_id FROM emp WHERE manager_id IS NOT NULL)"
    );
}

#[test]
fn scalar_subquery_in_projection() {
    let total = Select.column(sum(col("amount"))).from(table("payments"));
    let query = Select
        .column(col("name"))
        .column(subquery(total).alias("total"))
        .from(table("customers"));
    assert_eq!(
        query.to_sql(),
        "SELECT name, (SELECT SUM(amount) FROM payments) AS total FROM customers"
    );
}

#[test]
fn subquery_in_from_with_implicit_alias() {
    let inner = Select
        .column(col("a"))
        .from(table("t"))
        .order_by([col("a")])
        .unwrap()
        .limit(3);
    let query = Select.star().from(subquery_table(inner).alias_implicit("top3"));
    assert_eq!(
        query.to_sql(),
        "SELECT * FROM (SELECT a FROM t ORDER BY a LIMIT 3) top3"
    );
}

#[test]
fn case_and_cast_in_projection() {
    let query = Select
        .column(
            Case.of(col("kind"))
                .when(1)
                .then("one")
                .else_("many")
                .end()
                .alias("label"),
        )
        .column(cast(col("price"), DataType::Integer))
        .from(table("items"));
    assert_eq!(
        query.to_sql(),
        "SELECT CASE kind WHEN 1 THEN 'one' ELSE 'many' END AS label, \
         CAST (price AS INTEGER) FROM items"
    );
}
