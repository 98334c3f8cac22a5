//! Phoenix column types: the core catalog plus array suffixes.

use std::fmt;

use sqlrail_core::render::{render, SqlElement};
use sqlrail_core::types::DataType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArraySuffix {
    /// ` ARRAY`
    Keyword,
    /// ` ARRAY[n]`, or ` ARRAY[]` without a dimension.
    Bracketed(Option<u32>),
}

/// A Phoenix column type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct PhoenixType {
    base: DataType,
    array: Option<ArraySuffix>,
}

impl PhoenixType {
    /// The element type.
    #[must_use]
    pub const fn base(&self) -> &DataType {
        &self.base
    }

    /// Whether this is an array type.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.array.is_some()
    }
}

impl SqlElement for PhoenixType {
    fn render_into(&self, buf: &mut String) {
        self.base.render_into(buf);
        match self.array {
            None => {}
            Some(ArraySuffix::Keyword) => buf.push_str(" ARRAY"),
            Some(ArraySuffix::Bracketed(None)) => buf.push_str(" ARRAY[]"),
            Some(ArraySuffix::Bracketed(Some(n))) => buf.push_str(&format!(" ARRAY[{n}]")),
        }
    }
}

impl fmt::Display for PhoenixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl From<DataType> for PhoenixType {
    fn from(base: DataType) -> Self {
        Self { base, array: None }
    }
}

/// `type ARRAY`, which may still take a bracketed dimension.
#[derive(Debug, Clone)]
#[must_use]
pub struct ArrayType {
    base: DataType,
}

impl ArrayType {
    /// `type ARRAY[n]`
    pub fn dimension(self, n: u32) -> PhoenixType {
        PhoenixType {
            base: self.base,
            array: Some(ArraySuffix::Bracketed(Some(n))),
        }
    }

    /// `type ARRAY[]`
    pub fn brackets(self) -> PhoenixType {
        PhoenixType {
            base: self.base,
            array: Some(ArraySuffix::Bracketed(None)),
        }
    }
}

impl From<ArrayType> for PhoenixType {
    fn from(array: ArrayType) -> Self {
        Self {
            base: array.base,
            array: Some(ArraySuffix::Keyword),
        }
    }
}

/// Array construction on core data types.
pub trait ArrayExt: Into<DataType> {
    /// `type ARRAY`
    fn array(self) -> ArrayType {
        ArrayType { base: self.into() }
    }
}

impl ArrayExt for DataType {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_type() {
        let ty = PhoenixType::from(DataType::Char(Some(15)));
        assert_eq!(ty.to_string(), "CHAR(15)");
        assert!(!ty.is_array());
    }

    #[test]
    fn test_array_suffixes() {
        assert_eq!(
            PhoenixType::from(DataType::Integer.array()).to_string(),
            "INTEGER ARRAY"
        );
        assert_eq!(
            DataType::Varchar(None).array().dimension(10).to_string(),
            "VARCHAR ARRAY[10]"
        );
        assert_eq!(DataType::Bigint.array().brackets().to_string(), "BIGINT ARRAY[]");
    }

    #[test]
    fn test_base_is_kept() {
        let ty = DataType::Double.array().dimension(3);
        assert_eq!(ty.base(), &DataType::Double);
        assert!(ty.is_array());
    }
}
