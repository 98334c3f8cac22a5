//! Operator precedence levels.

/// Binding strength of an expression production, loosest first.
///
/// The ordering follows SQLite's operator table. Every expression node is
/// tagged with one of these levels when it is built, and an operand is
/// wrapped in parentheses when its level is lower than what its slot
/// requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// `OR`
    Or,
    /// `AND`
    And,
    /// Prefix `NOT`
    Not,
    /// `= == != <> IS IN LIKE GLOB MATCH REGEXP BETWEEN ISNULL NOTNULL`
    Equality,
    /// `< <= > >=`
    Comparison,
    /// `& | << >>`
    Bitwise,
    /// `+ -`
    Additive,
    /// `* / %`
    Multiplicative,
    /// `|| -> ->>`
    Concat,
    /// `COLLATE`
    Collate,
    /// Prefix `- + ~`, and negative numeric literals.
    Unary,
    /// Literals, column references, calls and parenthesized expressions.
    Primary,
}

impl Precedence {
    /// The next tighter level.
    ///
    /// Right operands of left-associative operators must bind at least this
    /// tightly.
    #[must_use]
    pub const fn tighter(self) -> Self {
        match self {
            Self::Or => Self::And,
            Self::And => Self::Not,
            Self::Not => Self::Equality,
            Self::Equality => Self::Comparison,
            Self::Comparison => Self::Bitwise,
            Self::Bitwise => Self::Additive,
            Self::Additive => Self::Multiplicative,
            Self::Multiplicative => Self::Concat,
            Self::Concat => Self::Collate,
            Self::Collate => Self::Unary,
            Self::Unary | Self::Primary => Self::Primary,
        }
    }
}
