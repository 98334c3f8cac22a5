//! Rendering tests for complete statements built through the prelude.

use sqlrail_core::definition::ColumnDef;
use sqlrail_core::prelude::*;

// ===================================================================
// CREATE TABLE
// ===================================================================

#[test]
fn create_table_with_table_constraints() {
    let stmt = Create
        .table()
        .name(("main", "orders"))
        .column(column("id").typed(DataType::Integer))
        .column(column("customer_id").typed(DataType::Integer).not_null())
        .column(column("total").typed(DataType::Real).default_value(0.0))
        .constraint(primary_key(["id"]).unwrap())
        .constraint(
            foreign_key(["customer_id"])
                .unwrap()
                .references("customers")
                .columns(["id"])
                .unwrap()
                .on_delete(ForeignKeyAction::Cascade),
        )
        .constraint(constraint("positive_total").check(col("total").gt_eq(0)));

    assert_eq!(
        stmt.to_sql(),
        "CREATE TABLE main.orders (id INTEGER, customer_id INTEGER NOT NULL, total REAL DEFAULT 0.0, \
         PRIMARY KEY (id), FOREIGN KEY (customer_id) REFERENCES customers (id) ON DELETE CASCADE, \
         CONSTRAINT positive_total CHECK (total >= 0))"
    );
}

#[test]
fn create_temp_table_with_options() {
    let stmt = Create
        .temp()
        .table()
        .if_not_exists()
        .name("kv")
        .column(column("k").typed(DataType::Text).primary_key())
        .column(column("v").typed(DataType::Blob))
        .without_rowid()
        .strict();
    assert_eq!(
        stmt.to_sql(),
        "CREATE TEMP TABLE IF NOT EXISTS kv (k TEXT PRIMARY KEY, v BLOB) WITHOUT ROWID, STRICT"
    );
}

#[test]
fn create_table_column_constraint_chain() {
    let stmt = Create.table().name("people").column(
        column("email")
            .typed(DataType::Varchar(Some(255)))
            .constraint("email_nn")
            .not_null()
            .on_conflict()
            .abort()
            .unique()
            .collate("NOCASE")
            .default_value(lit("")),
    );
    assert_eq!(
        stmt.to_sql(),
        "CREATE TABLE people (email VARCHAR(255) CONSTRAINT email_nn NOT NULL ON CONFLICT ABORT \
         UNIQUE COLLATE NOCASE DEFAULT '')"
    );
}

#[test]
fn create_table_default_expression_is_parenthesized() {
    let stmt = Create
        .table()
        .name("t")
        .column(column("n").typed(DataType::Integer).default_value(lit(1).add(2)))
        .column(column("m").typed(DataType::Integer).default_value(-1));
    assert_eq!(
        stmt.to_sql(),
        "CREATE TABLE t (n INTEGER DEFAULT (1 + 2), m INTEGER DEFAULT -1)"
    );
}

#[test]
fn create_table_generated_column() {
    let stmt = Create
        .table()
        .name("boxes")
        .column(column("w").typed(DataType::Real))
        .column(column("h").typed(DataType::Real))
        .column(
            column("area")
                .typed(DataType::Real)
                .generated_always()
                .as_expr(col("w").mul(col("h")))
                .stored(),
        );
    assert_eq!(
        stmt.to_sql(),
        "CREATE TABLE boxes (w REAL, h REAL, area REAL GENERATED ALWAYS AS (w * h) STORED)"
    );
}

#[test]
fn create_table_as_select() {
    let stmt = Create
        .table()
        .name("archive")
        .as_select(Select.star().from(table("orders")).where_clause(col("total").lt(0)));
    assert_eq!(
        stmt.to_sql(),
        "CREATE TABLE archive AS SELECT * FROM orders WHERE total < 0"
    );
}

#[test]
fn create_table_rejects_empty_column_list() {
    let err = Create
        .table()
        .name("t")
        .columns(Vec::<ColumnDef>::new())
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::InsufficientOperands {
            construct: "table definition",
            required: 1,
            given: 0,
        }
    );
}

#[test]
fn quoted_names_in_ddl() {
    let stmt = Create
        .table()
        .name("order items")
        .column(column("group").typed(DataType::Text))
        .column(column("2nd").typed(DataType::Text));
    assert_eq!(
        stmt.to_sql(),
        "CREATE TABLE \"order items\" (group TEXT, \"2nd\" TEXT)"
    );
}

// ===================================================================
// Indexes and virtual tables
// ===================================================================

#[test]
fn create_unique_partial_index() {
    let stmt = Create
        .unique()
        .index()
        .if_not_exists()
        .name("idx_active_email")
        .on("users", [column("email").desc(), IndexedColumn::from("id")])
        .unwrap()
        .where_clause(col("active").is(lit(true)));
    assert_eq!(
        stmt.to_sql(),
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_active_email ON users (email DESC, id) \
         WHERE active IS TRUE"
    );
}

#[test]
fn create_index_on_expression() {
    let stmt = Create
        .index()
        .name(("main", "idx_lower"))
        .on(
            "users",
            [IndexedColumn::from(func("lower", [col("name")])).collate("NOCASE")],
        )
        .unwrap();
    assert_eq!(
        stmt.to_sql(),
        "CREATE INDEX main.idx_lower ON users (lower(name) COLLATE NOCASE)"
    );
}

#[test]
fn create_index_requires_a_column() {
    assert!(Create
        .index()
        .name("i")
        .on("t", Vec::<IndexedColumn>::new())
        .is_err());
}

#[test]
fn create_virtual_table() {
    assert_eq!(
        Create
            .virtual_table()
            .if_not_exists()
            .name("docs")
            .using("fts5")
            .args(["title", "body", "tokenize = 'porter'"])
            .to_sql(),
        "CREATE VIRTUAL TABLE IF NOT EXISTS docs USING fts5(title, body, tokenize = 'porter')"
    );
    assert_eq!(
        Create.virtual_table().name("stat").using("dbstat").to_sql(),
        "CREATE VIRTUAL TABLE stat USING dbstat"
    );
}

// ===================================================================
// DROP TABLE, sequences
// ===================================================================

#[test]
fn drop_table() {
    assert_eq!(DropTable.name("t").to_sql(), "DROP TABLE t");
    assert_eq!(
        DropTable.if_exists().name(("temp", "t")).to_sql(),
        "DROP TABLE IF EXISTS temp.t"
    );
}

#[test]
fn sequence_lifecycle() {
    let create = CreateSequence
        .name(("my_schema", "my_sequence"))
        .start(0)
        .cache(10);
    assert_eq!(
        create.to_sql(),
        "CREATE SEQUENCE my_schema.my_sequence START 0 CACHE 10"
    );

    let query = Select.column(Next.values(5).for_sequence("my_table_id"));
    assert_eq!(query.to_sql(), "SELECT NEXT 5 VALUES FOR my_table_id");

    assert_eq!(
        DropSequence.if_exists().name(("my_schema", "my_sequence")).to_sql(),
        "DROP SEQUENCE IF EXISTS my_schema.my_sequence"
    );
}

#[test]
fn sequence_value_with_bind_count() {
    let e = Next.values(BindParameter::named("n").unwrap()).for_sequence("s");
    assert_eq!(e.to_string(), "NEXT :n VALUES FOR s");
    assert_eq!(Current.value().for_sequence("s").to_string(), "CURRENT VALUE FOR s");
}

// ===================================================================
// Transactions and maintenance
// ===================================================================

#[test]
fn savepoint_round() {
    let statements: Vec<String> = vec![
        Savepoint.name("sp one").to_sql(),
        Release.savepoint().name("sp one").to_sql(),
        Rollback.transaction().to().savepoint().name("sp one").to_sql(),
    ];
    assert_eq!(
        statements,
        [
            "SAVEPOINT \"sp one\"",
            "RELEASE SAVEPOINT \"sp one\"",
            "ROLLBACK TRANSACTION TO SAVEPOINT \"sp one\"",
        ]
    );
}

#[test]
fn vacuum_into_escapes_file_name() {
    assert_eq!(
        Vacuum.schema("main").into_file("/tmp/it's.db").to_sql(),
        "VACUUM main INTO '/tmp/it''s.db'"
    );
}

// ===================================================================
// Rendering
// ===================================================================

#[test]
fn rendering_is_repeatable() {
    let stmt = Create
        .table()
        .name("t")
        .column(column("a").typed(DataType::Integer).check(col("a").between(1, 9)));
    let first = stmt.to_sql();
    let second = stmt.to_sql();
    assert_eq!(first, second);
    assert_eq!(first, "CREATE TABLE t (a INTEGER CHECK (a BETWEEN 1 AND 9))");
}

#[test]
fn builders_share_prefixes() {
    let base = Create.table().name("t").column(column("a").typed(DataType::Integer));
    let plain = base.clone();
    let strict = base.strict();
    assert_eq!(plain.to_sql(), "CREATE TABLE t (a INTEGER)");
    assert_eq!(strict.to_sql(), "CREATE TABLE t (a INTEGER) STRICT");
}

#[test]
fn statements_cross_threads() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let query = Select.column(col("a").add(1)).from(table("t"));
    assert_send_sync(&query);
    let handle = std::thread::spawn(move || query.to_sql());
    assert_eq!(handle.join().unwrap(), "SELECT a + 1 FROM t");
}
