//! Bind parameter placeholders.

use crate::error::{BuildError, Result};
use crate::name::is_bare_identifier;
use crate::render::SqlElement;

/// A placeholder for a value supplied at execution time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BindParameter {
    /// `?`
    Anonymous,
    /// `?NNN`
    Numbered(u32),
    /// `:NNN`
    Indexed(u32),
    /// `:name`
    Named(String),
}

impl BindParameter {
    /// `?`
    #[must_use]
    pub const fn anonymous() -> Self {
        Self::Anonymous
    }

    /// `?n`
    #[must_use]
    pub const fn numbered(n: u32) -> Self {
        Self::Numbered(n)
    }

    /// `:n`
    #[must_use]
    pub const fn indexed(n: u32) -> Self {
        Self::Indexed(n)
    }

    /// `:name`
    ///
    /// Parameter names are never quoted, so `name` must be a plain
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidParameterName`] when `name` does not
    /// match `[A-Za-z_][A-Za-z0-9_]*`.
    pub fn named(name: &str) -> Result<Self> {
        if !is_bare_identifier(name) {
            tracing::debug!(name, "rejecting bind parameter name");
            return Err(BuildError::InvalidParameterName {
                name: String::from(name),
            });
        }
        Ok(Self::Named(String::from(name)))
    }
}

impl SqlElement for BindParameter {
    fn render_into(&self, buf: &mut String) {
        match self {
            Self::Anonymous => buf.push('?'),
            Self::Numbered(n) => buf.push_str(&format!("?{n}")),
            Self::Indexed(n) => buf.push_str(&format!(":{n}")),
            Self::Named(name) => {
                buf.push(':');
                buf.push_str(name);
            }
        }
    }
}
