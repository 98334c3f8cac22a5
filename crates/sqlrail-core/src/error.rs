//! Errors raised while building statements.
//!
//! Clause ordering mistakes never reach this type: they are rejected by the
//! compiler. What remains are arity checks on variadic constructs, values
//! that have no SQL literal form, and malformed parameter names.

/// Errors that can occur while constructing a builder node.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A variadic construct received fewer items than it requires.
    #[error("{construct} requires at least {required} item(s), got {given}")]
    InsufficientOperands {
        /// The construct being built, e.g. `row value`.
        construct: &'static str,
        /// Minimum number of items.
        required: usize,
        /// Number of items actually supplied.
        given: usize,
    },

    /// A literal factory received a value with no SQL rendering.
    #[error("Unsupported literal type: {type_name}")]
    UnsupportedLiteralType {
        /// Runtime type of the rejected value.
        type_name: &'static str,
    },

    /// A named bind parameter is not a plain identifier.
    #[error("Invalid bind parameter name: {name:?}")]
    InvalidParameterName {
        /// The rejected name.
        name: String,
    },
}

/// Result type for fallible builder operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Collects `items` and checks that at least `required` were supplied.
///
/// Dialect crates use this for their own variadic clauses.
///
/// # Errors
///
/// Returns [`BuildError::InsufficientOperands`] when fewer than `required`
/// items are supplied.
pub fn collect_at_least<T>(
    construct: &'static str,
    required: usize,
    items: impl IntoIterator<Item = T>,
) -> Result<Vec<T>> {
    let items: Vec<T> = items.into_iter().collect();
    if items.len() < required {
        tracing::debug!(construct, required, given = items.len(), "rejecting short item list");
        return Err(BuildError::InsufficientOperands {
            construct,
            required,
            given: items.len(),
        });
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_at_least_accepts_enough_items() {
        let items = collect_at_least("row value", 2, [1, 2, 3]).unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_collect_at_least_rejects_short_lists() {
        let err = collect_at_least("row value", 2, [1]).unwrap_err();
        assert_eq!(
            err,
            BuildError::InsufficientOperands {
                construct: "row value",
                required: 2,
                given: 1,
            }
        );
        assert_eq!(
            err.to_string(),
            "row value requires at least 2 item(s), got 1"
        );
    }
}
