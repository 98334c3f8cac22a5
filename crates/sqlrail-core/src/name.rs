//! SQL identifiers.
//!
//! An identifier is emitted bare when it looks like `[A-Za-z_][A-Za-z0-9_]*`
//! and double-quoted otherwise. The decision is made once, when the [`Name`]
//! is built.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::render::SqlElement;

static BARE_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid identifier regex")
});

/// Whether `raw` can be written without quotes.
pub(crate) fn is_bare_identifier(raw: &str) -> bool {
    BARE_IDENTIFIER.is_match(raw)
}

/// Quotes `raw` unless it is a plain identifier and `force_quote` is false.
///
/// Quoting doubles every embedded `"` and wraps the result in `"`.
///
/// ```rust
/// use sqlrail_core::name::quote_if_necessary;
///
/// assert_eq!(quote_if_necessary("abc", false), "abc");
/// assert_eq!(quote_if_necessary("abc", true), "\"abc\"");
/// assert_eq!(quote_if_necessary("a.c", false), "\"a.c\"");
/// assert_eq!(quote_if_necessary("a\"2\"1", false), "\"a\"\"2\"\"1\"");
/// ```
#[must_use]
pub fn quote_if_necessary(raw: &str, force_quote: bool) -> String {
    if !force_quote && is_bare_identifier(raw) {
        return String::from(raw);
    }
    let escaped = raw.replace('"', "\"\"");
    format!("\"{escaped}\"")
}

/// A rendered SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    raw: Arc<str>,
    rendered: Arc<str>,
}

impl Name {
    /// Creates a name, quoting it only if required.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            raw: Arc::from(raw),
            rendered: Arc::from(quote_if_necessary(raw, false)),
        }
    }

    /// Creates a name that is always quoted.
    #[must_use]
    pub fn quoted(raw: &str) -> Self {
        Self {
            raw: Arc::from(raw),
            rendered: Arc::from(quote_if_necessary(raw, true)),
        }
    }

    /// The identifier as given by the caller.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The identifier as it appears in SQL text.
    #[must_use]
    pub fn as_sql(&self) -> &str {
        &self.rendered
    }
}

impl SqlElement for Name {
    fn render_into(&self, buf: &mut String) {
        buf.push_str(&self.rendered);
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl From<&str> for Name {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Name {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&String> for Name {
    fn from(raw: &String) -> Self {
        Self::new(raw)
    }
}

/// A name with an optional qualifier, rendered `qualifier.name`.
///
/// The qualifier is a schema for tables, indexes and sequences, a table or
/// alias for columns, and a column family for Phoenix columns. A plain
/// string converts to an unqualified name; it is never split on `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    qualifier: Option<Name>,
    name: Name,
}

impl QualifiedName {
    /// Creates an unqualified name.
    #[must_use]
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            qualifier: None,
            name: name.into(),
        }
    }

    /// Creates a qualified name.
    #[must_use]
    pub fn qualified(qualifier: impl Into<Name>, name: impl Into<Name>) -> Self {
        Self {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        }
    }

    /// The qualifier, if any.
    #[must_use]
    pub const fn qualifier(&self) -> Option<&Name> {
        self.qualifier.as_ref()
    }

    /// The unqualified part.
    #[must_use]
    pub const fn name(&self) -> &Name {
        &self.name
    }
}

impl SqlElement for QualifiedName {
    fn render_into(&self, buf: &mut String) {
        if let Some(qualifier) = &self.qualifier {
            qualifier.render_into(buf);
            buf.push('.');
        }
        self.name.render_into(buf);
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(qualifier) = &self.qualifier {
            write!(f, "{qualifier}.")?;
        }
        write!(f, "{}", self.name)
    }
}

impl From<Name> for QualifiedName {
    fn from(name: Name) -> Self {
        Self::new(name)
    }
}

impl From<&str> for QualifiedName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for QualifiedName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl<Q: Into<Name>, N: Into<Name>> From<(Q, N)> for QualifiedName {
    fn from((qualifier, name): (Q, N)) -> Self {
        Self::qualified(qualifier, name)
    }
}
