//! Column, table and index definitions.

mod column;
mod conflict;
mod foreign_key;
mod indexed_column;
mod table_constraint;

pub use column::{
    column, ColumnConstraints, ColumnDef, ColumnForeignKey, ColumnName, ConflictableColumn,
    GeneratedAlways, GeneratedColumn, NamedColumnConstraint, PkAcceptsConflict, PkOrdered,
    PkResolved, PkStart, PrimaryKeyColumn,
};
pub use conflict::{ConflictResolution, ConflictTarget, OnConflict};
pub use foreign_key::{
    AcceptsTriggers, ForeignKey, ForeignKeyAction, ForeignKeyClause, ForeignKeyOwner, Referenced,
    Settled, WithDeferrable, WithTriggers,
};
pub use indexed_column::IndexedColumn;
pub use table_constraint::{
    check, constraint, foreign_key, primary_key, primary_key_autoincrement, unique,
    ForeignKeyColumns, KeyConstraint, NamedTableConstraint, TableConstraint, TableForeignKey,
};
