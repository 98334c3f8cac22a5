//! Column type specifications.

use std::fmt;

use crate::name::Name;
use crate::render::{render, SqlElement};

/// SQL data types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    // Integer types
    /// Tiny integer (1 byte).
    Tinyint,
    /// Small integer (2 bytes).
    Smallint,
    /// `INT`.
    Int,
    /// `INTEGER`, the type of SQLite rowid aliases.
    Integer,
    /// Big integer (8 bytes).
    Bigint,

    // Floating point
    /// Real (4-byte float).
    Real,
    /// Float.
    Float,
    /// Double precision (8-byte float).
    Double,
    /// Decimal with precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },
    /// Numeric (alias for Decimal).
    Numeric {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },

    // String types
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Text (variable length, no limit).
    Text,

    // Binary types
    /// Binary large object.
    Blob,
    /// Binary with specified length.
    Binary(Option<u32>),
    /// Variable-length binary.
    Varbinary(Option<u32>),

    // Date/time types
    /// Date.
    Date,
    /// Time.
    Time,
    /// Timestamp.
    Timestamp,
    /// DateTime (SQLite-style).
    Datetime,

    /// Boolean.
    Boolean,

    /// Any other type name.
    Named(TypeName),
}

fn render_sized(keyword: &str, size: Option<u32>, buf: &mut String) {
    buf.push_str(keyword);
    if let Some(n) = size {
        buf.push_str(&format!("({n})"));
    }
}

fn render_decimal(keyword: &str, precision: Option<u16>, scale: Option<u16>, buf: &mut String) {
    buf.push_str(keyword);
    match (precision, scale) {
        (Some(p), Some(s)) => buf.push_str(&format!("({p}, {s})")),
        (Some(p), None) => buf.push_str(&format!("({p})")),
        _ => {}
    }
}

impl SqlElement for DataType {
    fn render_into(&self, buf: &mut String) {
        match self {
            Self::Tinyint => buf.push_str("TINYINT"),
            Self::Smallint => buf.push_str("SMALLINT"),
            Self::Int => buf.push_str("INT"),
            Self::Integer => buf.push_str("INTEGER"),
            Self::Bigint => buf.push_str("BIGINT"),
            Self::Real => buf.push_str("REAL"),
            Self::Float => buf.push_str("FLOAT"),
            Self::Double => buf.push_str("DOUBLE"),
            Self::Decimal { precision, scale } => render_decimal("DECIMAL", *precision, *scale, buf),
            Self::Numeric { precision, scale } => render_decimal("NUMERIC", *precision, *scale, buf),
            Self::Char(len) => render_sized("CHAR", *len, buf),
            Self::Varchar(len) => render_sized("VARCHAR", *len, buf),
            Self::Text => buf.push_str("TEXT"),
            Self::Blob => buf.push_str("BLOB"),
            Self::Binary(len) => render_sized("BINARY", *len, buf),
            Self::Varbinary(len) => render_sized("VARBINARY", *len, buf),
            Self::Date => buf.push_str("DATE"),
            Self::Time => buf.push_str("TIME"),
            Self::Timestamp => buf.push_str("TIMESTAMP"),
            Self::Datetime => buf.push_str("DATETIME"),
            Self::Boolean => buf.push_str("BOOLEAN"),
            Self::Named(name) => name.render_into(buf),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl From<TypeName> for DataType {
    fn from(name: TypeName) -> Self {
        Self::Named(name)
    }
}

/// A free-form type name with up to two numeric arguments.
///
/// Each whitespace-separated word is an identifier, so multi-word names such
/// as `UNSIGNED BIG INT` render as written.
///
/// ```rust
/// use sqlrail_core::types::TypeName;
/// use sqlrail_core::render::render;
///
/// assert_eq!(render(&TypeName::new("VARYING CHARACTER").with_size(255)), "VARYING CHARACTER(255)");
/// assert_eq!(render(&TypeName::new("NUMERIC").with_size_and_scale(10, 5)), "NUMERIC(10, 5)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    words: Vec<Name>,
    args: TypeArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeArgs {
    None,
    One(i64),
    Two(i64, i64),
}

impl TypeName {
    /// Creates a type name without arguments.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            words: name.split_whitespace().map(Name::new).collect(),
            args: TypeArgs::None,
        }
    }

    /// Adds a single size argument, e.g. `VARCHAR(255)`.
    #[must_use]
    pub const fn with_size(mut self, size: i64) -> Self {
        self.args = TypeArgs::One(size);
        self
    }

    /// Adds two arguments, e.g. `DECIMAL(10, 2)`.
    #[must_use]
    pub const fn with_size_and_scale(mut self, size: i64, scale: i64) -> Self {
        self.args = TypeArgs::Two(size, scale);
        self
    }
}

impl SqlElement for TypeName {
    fn render_into(&self, buf: &mut String) {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                buf.push(' ');
            }
            word.render_into(buf);
        }
        match self.args {
            TypeArgs::None => {}
            TypeArgs::One(n) => buf.push_str(&format!("({n})")),
            TypeArgs::Two(n, m) => buf.push_str(&format!("({n}, {m})")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_types() {
        assert_eq!(DataType::Integer.to_string(), "INTEGER");
        assert_eq!(DataType::Char(Some(50)).to_string(), "CHAR(50)");
        assert_eq!(DataType::Varchar(None).to_string(), "VARCHAR");
        assert_eq!(
            DataType::Decimal {
                precision: Some(10),
                scale: Some(2)
            }
            .to_string(),
            "DECIMAL(10, 2)"
        );
        assert_eq!(
            DataType::Numeric {
                precision: Some(8),
                scale: None
            }
            .to_string(),
            "NUMERIC(8)"
        );
    }

    #[test]
    fn test_named_types() {
        assert_eq!(render(&TypeName::new("INT")), "INT");
        assert_eq!(render(&TypeName::new("UNSIGNED BIG INT")), "UNSIGNED BIG INT");
        assert_eq!(render(&TypeName::new("my type")), "my type");
        assert_eq!(render(&TypeName::new("INT").with_size(-1)), "INT(-1)");
        assert_eq!(DataType::from(TypeName::new("JSONB")).to_string(), "JSONB");
    }
}
