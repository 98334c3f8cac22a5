//! SQL literal values.
//!
//! Values are always rendered inline: strings are single-quoted with embedded
//! quotes doubled, so no value can break out of its literal.

use crate::render::SqlElement;

/// A scalar value that can appear as a SQL literal.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Vec<u8>),
}

impl SqlValue {
    /// Returns the SQL representation of the value.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        let mut buf = String::new();
        self.render_into(&mut buf);
        buf
    }

    /// Whether the literal starts with a minus sign.
    ///
    /// Such literals bind like a unary minus expression, not like an atom.
    #[must_use]
    pub fn is_negative_number(&self) -> bool {
        match self {
            Self::Int(n) => *n < 0,
            Self::Float(f) => f.is_sign_negative() && !f.is_nan() && *f != 0.0,
            _ => false,
        }
    }
}

fn render_float(f: f64, buf: &mut String) {
    if f.is_nan() {
        // SQLite stores NaN as NULL.
        buf.push_str("NULL");
    } else if f.is_infinite() {
        buf.push_str(if f > 0.0 { "9e999" } else { "-9e999" });
    } else {
        // Debug keeps the fractional part of integral floats (`1.0`, not `1`).
        buf.push_str(&format!("{f:?}"));
    }
}

impl SqlElement for SqlValue {
    fn render_into(&self, buf: &mut String) {
        match self {
            Self::Null => buf.push_str("NULL"),
            Self::Bool(true) => buf.push_str("TRUE"),
            Self::Bool(false) => buf.push_str("FALSE"),
            Self::Int(n) => buf.push_str(&n.to_string()),
            Self::Float(f) => render_float(*f, buf),
            Self::Text(s) => {
                buf.push('\'');
                buf.push_str(&s.replace('\'', "''"));
                buf.push('\'');
            }
            Self::Blob(b) => {
                buf.push_str("X'");
                for byte in b {
                    buf.push_str(&format!("{byte:02X}"));
                }
                buf.push('\'');
            }
        }
    }
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

impl ToSqlValue for bool {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Bool(self)
    }
}

macro_rules! int_to_sql_value {
    ($($ty:ty),*) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::Int(i64::from(self))
                }
            }
        )*
    };
}

int_to_sql_value!(i8, i16, i32, i64, u8, u16, u32);

impl ToSqlValue for f64 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(self)
    }
}

impl ToSqlValue for f32 {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Float(f64::from(self))
    }
}

impl ToSqlValue for String {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(self)
    }
}

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

impl ToSqlValue for Vec<u8> {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self)
    }
}

impl ToSqlValue for &[u8] {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Blob(self.to_vec())
    }
}

#[cfg(feature = "json")]
mod json {
    use serde_json::Value;

    use super::SqlValue;
    use crate::error::BuildError;

    impl TryFrom<&Value> for SqlValue {
        type Error = BuildError;

        fn try_from(value: &Value) -> Result<Self, Self::Error> {
            match value {
                Value::Null => Ok(Self::Null),
                Value::Bool(b) => Ok(Self::Bool(*b)),
                Value::Number(n) => {
                    if let Some(i) = n.as_i64() {
                        Ok(Self::Int(i))
                    } else if n.is_u64() {
                        Err(BuildError::UnsupportedLiteralType { type_name: "u64" })
                    } else {
                        n.as_f64()
                            .map(Self::Float)
                            .ok_or(BuildError::UnsupportedLiteralType { type_name: "number" })
                    }
                }
                Value::String(s) => Ok(Self::Text(s.clone())),
                Value::Array(_) => Err(BuildError::UnsupportedLiteralType { type_name: "array" }),
                Value::Object(_) => Err(BuildError::UnsupportedLiteralType { type_name: "object" }),
            }
        }
    }

    impl TryFrom<Value> for SqlValue {
        type Error = BuildError;

        fn try_from(value: Value) -> Result<Self, Self::Error> {
            Self::try_from(&value)
        }
    }
}
