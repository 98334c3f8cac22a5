//! Rendering pipeline.
//!
//! Every node appends its own text to a shared buffer after asking its
//! predecessor (or children) to do the same. The walk is depth-first and
//! strictly left to right: nothing is ever written out of order, and nothing
//! already written is revisited.

/// A node that can append its SQL text to a buffer.
pub trait SqlElement {
    /// Appends this node's SQL text to `buf`.
    fn render_into(&self, buf: &mut String);
}

/// A complete, executable SQL statement.
///
/// Only terminal builder states implement this trait, so `to_sql` is not
/// reachable from a half-built statement.
pub trait Statement: SqlElement {
    /// Renders the statement.
    ///
    /// Rendering takes `&self` and keeps no state between calls, so calling
    /// it repeatedly always yields the same text.
    #[must_use]
    fn to_sql(&self) -> String {
        let mut buf = String::with_capacity(64);
        self.render_into(&mut buf);
        tracing::trace!(sql = %buf, "rendered statement");
        buf
    }
}

impl<T: SqlElement + ?Sized> SqlElement for &T {
    fn render_into(&self, buf: &mut String) {
        (**self).render_into(buf);
    }
}

impl<T: SqlElement + ?Sized> SqlElement for Box<T> {
    fn render_into(&self, buf: &mut String) {
        (**self).render_into(buf);
    }
}

/// Renders any element into a fresh string.
///
/// Mostly useful in tests and for fragments that are not statements.
#[must_use]
pub fn render<E: SqlElement + ?Sized>(element: &E) -> String {
    let mut buf = String::new();
    element.render_into(&mut buf);
    buf
}

/// Appends `items` separated by `", "`.
///
/// Dialect crates use this for their own list clauses.
pub fn render_comma_list<E: SqlElement>(items: &[E], buf: &mut String) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        item.render_into(buf);
    }
}

/// Appends `" (" + items + ")"`, the layout used by column lists in DDL.
pub(crate) fn render_paren_list<E: SqlElement>(items: &[E], buf: &mut String) {
    buf.push_str(" (");
    render_comma_list(items, buf);
    buf.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Word(&'static str);

    impl SqlElement for Word {
        fn render_into(&self, buf: &mut String) {
            buf.push_str(self.0);
        }
    }

    impl Statement for Word {}

    #[test]
    fn test_render_comma_list() {
        let mut buf = String::from("SELECT ");
        render_comma_list(&[Word("a"), Word("b"), Word("c")], &mut buf);
        assert_eq!(buf, "SELECT a, b, c");
    }

    #[test]
    fn test_render_paren_list() {
        let mut buf = String::from("t");
        render_paren_list(&[Word("a"), Word("b")], &mut buf);
        assert_eq!(buf, "t (a, b)");
    }

    #[test]
    fn test_to_sql_is_repeatable() {
        let stmt = Word("VACUUM");
        assert_eq!(stmt.to_sql(), stmt.to_sql());
        assert_eq!(render(&stmt), "VACUUM");
    }
}
