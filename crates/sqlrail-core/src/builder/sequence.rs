//! Sequence DDL and sequence value expressions.
//!
//! ```text
//! CREATE SEQUENCE [IF NOT EXISTS] [schema.]name
//!     [START [WITH] n] [INCREMENT [BY] n] [MINVALUE n] [MAXVALUE n] [CYCLE] [CACHE n]
//! DROP SEQUENCE [IF EXISTS] [schema.]name
//! NEXT VALUE FOR seq | NEXT n VALUES FOR seq | CURRENT VALUE FOR seq
//! ```
//!
//! Options keep their grammar order:
//!
//! ```compile_fail
//! use sqlrail_core::builder::CreateSequence;
//!
//! let _ = CreateSequence.name("s").cache(10).start(1);
//! ```

use std::fmt;
use std::marker::PhantomData;

use super::Param;
use crate::expr::{Expr, ExprNode};
use crate::name::QualifiedName;
use crate::render::{SqlElement, Statement};

// ===================================================================
// CREATE SEQUENCE
// ===================================================================

/// The `CREATE SEQUENCE` keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateSequence;

impl CreateSequence {
    /// `CREATE SEQUENCE IF NOT EXISTS`
    pub const fn if_not_exists(self) -> SequenceIfNotExists {
        SequenceIfNotExists
    }

    /// `CREATE SEQUENCE [schema.]name`
    pub fn name(self, name: impl Into<QualifiedName>) -> SequenceDef<SeqNamed> {
        SequenceDef::new(false, name.into())
    }
}

/// `CREATE SEQUENCE IF NOT EXISTS`, before the sequence name.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct SequenceIfNotExists;

impl SequenceIfNotExists {
    /// `... [schema.]name`
    pub fn name(self, name: impl Into<QualifiedName>) -> SequenceDef<SeqNamed> {
        SequenceDef::new(true, name.into())
    }
}

#[derive(Debug, Clone)]
struct SequenceOption {
    keyword: &'static str,
    value: Option<Param>,
}

// Typestate markers: the last option written.

/// Marker: name written.
pub struct SeqNamed;
/// Marker: `START` written.
pub struct SeqStarted;
/// Marker: `INCREMENT` written.
pub struct SeqIncremented;
/// Marker: `MINVALUE` written.
pub struct SeqMinValue;
/// Marker: `MAXVALUE` written.
pub struct SeqMaxValue;
/// Marker: `CYCLE` written.
pub struct SeqCycled;
/// Marker: `CACHE` written.
pub struct SeqCached;

/// States where `START` may follow.
pub trait AcceptsStart {}
/// States where `INCREMENT` may follow.
pub trait AcceptsIncrement {}
/// States where `MINVALUE` may follow.
pub trait AcceptsMinValue {}
/// States where `MAXVALUE` may follow.
pub trait AcceptsMaxValue {}
/// States where `CYCLE` may follow.
pub trait AcceptsCycle {}
/// States where `CACHE` may follow.
pub trait AcceptsCache {}

macro_rules! accepts {
    ($trait:ident: $($state:ty),*) => {
        $(impl $trait for $state {})*
    };
}

accepts!(AcceptsStart: SeqNamed);
accepts!(AcceptsIncrement: SeqNamed, SeqStarted);
accepts!(AcceptsMinValue: SeqNamed, SeqStarted, SeqIncremented);
accepts!(AcceptsMaxValue: SeqNamed, SeqStarted, SeqIncremented, SeqMinValue);
accepts!(AcceptsCycle: SeqNamed, SeqStarted, SeqIncremented, SeqMinValue, SeqMaxValue);
accepts!(
    AcceptsCache: SeqNamed,
    SeqStarted,
    SeqIncremented,
    SeqMinValue,
    SeqMaxValue,
    SeqCycled
);

/// `CREATE SEQUENCE name [options]`
#[must_use]
pub struct SequenceDef<S> {
    if_not_exists: bool,
    name: QualifiedName,
    options: Vec<SequenceOption>,
    _state: PhantomData<S>,
}

impl<S> Clone for SequenceDef<S> {
    fn clone(&self) -> Self {
        Self {
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            options: self.options.clone(),
            _state: PhantomData,
        }
    }
}

impl<S> fmt::Debug for SequenceDef<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceDef")
            .field("if_not_exists", &self.if_not_exists)
            .field("name", &self.name)
            .field("options", &self.options)
            .finish()
    }
}

impl SequenceDef<SeqNamed> {
    const fn new(if_not_exists: bool, name: QualifiedName) -> Self {
        Self {
            if_not_exists,
            name,
            options: vec![],
            _state: PhantomData,
        }
    }
}

impl<S> SequenceDef<S> {
    fn option<T>(mut self, keyword: &'static str, value: Option<Param>) -> SequenceDef<T> {
        self.options.push(SequenceOption { keyword, value });
        SequenceDef {
            if_not_exists: self.if_not_exists,
            name: self.name,
            options: self.options,
            _state: PhantomData,
        }
    }
}

impl<S: AcceptsStart> SequenceDef<S> {
    /// `... START n`
    pub fn start(self, value: impl Into<Param>) -> SequenceDef<SeqStarted> {
        self.option("START", Some(value.into()))
    }

    /// `... START WITH n`
    pub fn start_with(self, value: impl Into<Param>) -> SequenceDef<SeqStarted> {
        self.option("START WITH", Some(value.into()))
    }
}

impl<S: AcceptsIncrement> SequenceDef<S> {
    /// `... INCREMENT n`
    pub fn increment(self, value: impl Into<Param>) -> SequenceDef<SeqIncremented> {
        self.option("INCREMENT", Some(value.into()))
    }

    /// `... INCREMENT BY n`
    pub fn increment_by(self, value: impl Into<Param>) -> SequenceDef<SeqIncremented> {
        self.option("INCREMENT BY", Some(value.into()))
    }
}

impl<S: AcceptsMinValue> SequenceDef<S> {
    /// `... MINVALUE n`
    pub fn min_value(self, value: impl Into<Param>) -> SequenceDef<SeqMinValue> {
        self.option("MINVALUE", Some(value.into()))
    }
}

impl<S: AcceptsMaxValue> SequenceDef<S> {
    /// `... MAXVALUE n`
    pub fn max_value(self, value: impl Into<Param>) -> SequenceDef<SeqMaxValue> {
        self.option("MAXVALUE", Some(value.into()))
    }
}

impl<S: AcceptsCycle> SequenceDef<S> {
    /// `... CYCLE`
    pub fn cycle(self) -> SequenceDef<SeqCycled> {
        self.option("CYCLE", None)
    }
}

impl<S: AcceptsCache> SequenceDef<S> {
    /// `... CACHE n`
    pub fn cache(self, value: impl Into<Param>) -> SequenceDef<SeqCached> {
        self.option("CACHE", Some(value.into()))
    }
}

impl<S> SqlElement for SequenceDef<S> {
    fn render_into(&self, buf: &mut String) {
        buf.push_str(if self.if_not_exists {
            "CREATE SEQUENCE IF NOT EXISTS "
        } else {
            "CREATE SEQUENCE "
        });
        self.name.render_into(buf);
        for option in &self.options {
            buf.push(' ');
            buf.push_str(option.keyword);
            if let Some(value) = &option.value {
                buf.push(' ');
                value.render_into(buf);
            }
        }
    }
}

impl<S> Statement for SequenceDef<S> {}

// ===================================================================
// DROP SEQUENCE
// ===================================================================

/// The `DROP SEQUENCE` keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropSequence;

impl DropSequence {
    /// `DROP SEQUENCE IF EXISTS`
    pub const fn if_exists(self) -> DropSequenceIfExists {
        DropSequenceIfExists
    }

    /// `DROP SEQUENCE [schema.]name`
    pub fn name(self, name: impl Into<QualifiedName>) -> DropSequenceStatement {
        DropSequenceStatement {
            if_exists: false,
            name: name.into(),
        }
    }
}

/// `DROP SEQUENCE IF EXISTS`, before the sequence name.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct DropSequenceIfExists;

impl DropSequenceIfExists {
    /// `... [schema.]name`
    pub fn name(self, name: impl Into<QualifiedName>) -> DropSequenceStatement {
        DropSequenceStatement {
            if_exists: true,
            name: name.into(),
        }
    }
}

/// A complete `DROP SEQUENCE` statement.
#[derive(Debug, Clone)]
#[must_use]
pub struct DropSequenceStatement {
    if_exists: bool,
    name: QualifiedName,
}

impl SqlElement for DropSequenceStatement {
    fn render_into(&self, buf: &mut String) {
        buf.push_str(if self.if_exists {
            "DROP SEQUENCE IF EXISTS "
        } else {
            "DROP SEQUENCE "
        });
        self.name.render_into(buf);
    }
}

impl Statement for DropSequenceStatement {}

// ===================================================================
// Sequence values
// ===================================================================

/// `NEXT VALUE FOR seq`, `NEXT n VALUES FOR seq` or
/// `CURRENT VALUE FOR seq`.
#[derive(Debug, Clone)]
pub struct SequenceValue {
    current: bool,
    count: Option<Param>,
    sequence: QualifiedName,
}

impl SqlElement for SequenceValue {
    fn render_into(&self, buf: &mut String) {
        if self.current {
            buf.push_str("CURRENT VALUE FOR ");
        } else if let Some(count) = &self.count {
            buf.push_str("NEXT ");
            count.render_into(buf);
            buf.push_str(" VALUES FOR ");
        } else {
            buf.push_str("NEXT VALUE FOR ");
        }
        self.sequence.render_into(buf);
    }
}

fn sequence_expr(current: bool, count: Option<Param>, sequence: QualifiedName) -> Expr {
    Expr::primary(ExprNode::Sequence(SequenceValue {
        current,
        count,
        sequence,
    }))
}

/// The `NEXT` keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct Next;

impl Next {
    /// `NEXT VALUE`
    pub const fn value(self) -> NextValue {
        NextValue
    }

    /// `NEXT n VALUES`
    pub fn values(self, count: impl Into<Param>) -> NextValues {
        NextValues {
            count: count.into(),
        }
    }
}

/// `NEXT VALUE`, waiting for `FOR`.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct NextValue;

impl NextValue {
    /// `NEXT VALUE FOR seq`
    pub fn for_sequence(self, sequence: impl Into<QualifiedName>) -> Expr {
        sequence_expr(false, None, sequence.into())
    }
}

/// `NEXT n VALUES`, waiting for `FOR`.
#[derive(Debug, Clone)]
#[must_use]
pub struct NextValues {
    count: Param,
}

impl NextValues {
    /// `NEXT n VALUES FOR seq`
    pub fn for_sequence(self, sequence: impl Into<QualifiedName>) -> Expr {
        sequence_expr(false, Some(self.count), sequence.into())
    }
}

/// The `CURRENT` keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct Current;

impl Current {
    /// `CURRENT VALUE`
    pub const fn value(self) -> CurrentValue {
        CurrentValue
    }
}

/// `CURRENT VALUE`, waiting for `FOR`.
#[derive(Debug, Clone, Copy)]
#[must_use]
pub struct CurrentValue;

impl CurrentValue {
    /// `CURRENT VALUE FOR seq`
    pub fn for_sequence(self, sequence: impl Into<QualifiedName>) -> Expr {
        sequence_expr(true, None, sequence.into())
    }
}
