//! The foreign-key clause shared by column `REFERENCES` constraints and
//! table-level `FOREIGN KEY` constraints.
//!
//! ```text
//! REFERENCES table [(col, ...)]
//!     [ON DELETE action | ON UPDATE action | MATCH name]...
//!     [[NOT] DEFERRABLE [INITIALLY DEFERRED | INITIALLY IMMEDIATE]]
//! ```

use std::marker::PhantomData;

use crate::error::{collect_at_least, Result};
use crate::name::Name;
use crate::render::{render_paren_list, SqlElement};

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

#[derive(Debug, Clone)]
enum Trigger {
    OnDelete(ForeignKeyAction),
    OnUpdate(ForeignKeyAction),
    Match(Name),
}

#[derive(Debug, Clone, Copy)]
enum Initially {
    Deferred,
    Immediate,
}

#[derive(Debug, Clone, Copy)]
struct Deferrable {
    negated: bool,
    initially: Option<Initially>,
}

/// A rendered-ready foreign-key clause.
#[derive(Debug, Clone)]
pub struct ForeignKeyClause {
    table: Name,
    columns: Vec<Name>,
    triggers: Vec<Trigger>,
    deferrable: Option<Deferrable>,
}

impl SqlElement for ForeignKeyClause {
    fn render_into(&self, buf: &mut String) {
        buf.push_str(" REFERENCES ");
        self.table.render_into(buf);
        if !self.columns.is_empty() {
            render_paren_list(&self.columns, buf);
        }
        for trigger in &self.triggers {
            match trigger {
                Trigger::OnDelete(action) => {
                    buf.push_str(" ON DELETE ");
                    buf.push_str(action.as_sql());
                }
                Trigger::OnUpdate(action) => {
                    buf.push_str(" ON UPDATE ");
                    buf.push_str(action.as_sql());
                }
                Trigger::Match(name) => {
                    buf.push_str(" MATCH ");
                    name.render_into(buf);
                }
            }
        }
        if let Some(deferrable) = self.deferrable {
            buf.push_str(if deferrable.negated {
                " NOT DEFERRABLE"
            } else {
                " DEFERRABLE"
            });
            match deferrable.initially {
                Some(Initially::Deferred) => buf.push_str(" INITIALLY DEFERRED"),
                Some(Initially::Immediate) => buf.push_str(" INITIALLY IMMEDIATE"),
                None => {}
            }
        }
    }
}

/// The definition a foreign-key clause is attached to.
pub trait ForeignKeyOwner {
    /// What the owner becomes once the clause is attached.
    type Output;

    /// Attaches the finished clause.
    fn attach(self, clause: ForeignKeyClause) -> Self::Output;
}

// Typestate markers

/// Marker: `REFERENCES table`, columns may still follow.
pub struct Referenced;
/// Marker: columns or triggers given.
pub struct WithTriggers;
/// Marker: `[NOT] DEFERRABLE` given.
pub struct WithDeferrable;
/// Marker: `INITIALLY ...` given, nothing else may follow.
pub struct Settled;

/// States from which `ON DELETE`, `ON UPDATE`, `MATCH` and `DEFERRABLE` are
/// still available.
pub trait AcceptsTriggers {}
impl AcceptsTriggers for Referenced {}
impl AcceptsTriggers for WithTriggers {}

/// A foreign-key clause under construction, owned by `O`.
#[must_use]
pub struct ForeignKey<O, S> {
    owner: O,
    clause: ForeignKeyClause,
    _state: PhantomData<S>,
}

impl<O: Clone, S> Clone for ForeignKey<O, S> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner.clone(),
            clause: self.clause.clone(),
            _state: PhantomData,
        }
    }
}

impl<O: ForeignKeyOwner, S> ForeignKey<O, S> {
    fn transition<T>(self) -> ForeignKey<O, T> {
        ForeignKey {
            owner: self.owner,
            clause: self.clause,
            _state: PhantomData,
        }
    }

    /// Attaches the clause to its owner.
    pub(crate) fn finish(self) -> O::Output {
        self.owner.attach(self.clause)
    }
}

impl<O: ForeignKeyOwner> ForeignKey<O, Referenced> {
    pub(crate) fn new(owner: O, table: Name) -> Self {
        Self {
            owner,
            clause: ForeignKeyClause {
                table,
                columns: vec![],
                triggers: vec![],
                deferrable: None,
            },
            _state: PhantomData,
        }
    }

    /// `(col, ...)` of the referenced table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BuildError::InsufficientOperands`] for an empty list.
    pub fn columns<I>(mut self, columns: I) -> Result<ForeignKey<O, WithTriggers>>
    where
        I: IntoIterator,
        I::Item: Into<Name>,
    {
        self.clause.columns = collect_at_least(
            "foreign key column list",
            1,
            columns.into_iter().map(Into::into),
        )?;
        Ok(self.transition())
    }
}

impl<O: ForeignKeyOwner, S: AcceptsTriggers> ForeignKey<O, S> {
    /// `ON DELETE action`
    pub fn on_delete(mut self, action: ForeignKeyAction) -> ForeignKey<O, WithTriggers> {
        self.clause.triggers.push(Trigger::OnDelete(action));
        self.transition()
    }

    /// `ON UPDATE action`
    pub fn on_update(mut self, action: ForeignKeyAction) -> ForeignKey<O, WithTriggers> {
        self.clause.triggers.push(Trigger::OnUpdate(action));
        self.transition()
    }

    /// `MATCH name`
    pub fn match_name(mut self, name: impl Into<Name>) -> ForeignKey<O, WithTriggers> {
        self.clause.triggers.push(Trigger::Match(name.into()));
        self.transition()
    }

    /// `DEFERRABLE`
    pub fn deferrable(mut self) -> ForeignKey<O, WithDeferrable> {
        self.clause.deferrable = Some(Deferrable {
            negated: false,
            initially: None,
        });
        self.transition()
    }

    /// `NOT DEFERRABLE`
    pub fn not_deferrable(mut self) -> ForeignKey<O, WithDeferrable> {
        self.clause.deferrable = Some(Deferrable {
            negated: true,
            initially: None,
        });
        self.transition()
    }
}

impl<O: ForeignKeyOwner> ForeignKey<O, WithDeferrable> {
    fn initially(mut self, initially: Initially) -> ForeignKey<O, Settled> {
        if let Some(deferrable) = self.clause.deferrable.as_mut() {
            deferrable.initially = Some(initially);
        }
        self.transition()
    }

    /// `INITIALLY DEFERRED`
    pub fn initially_deferred(self) -> ForeignKey<O, Settled> {
        self.initially(Initially::Deferred)
    }

    /// `INITIALLY IMMEDIATE`
    pub fn initially_immediate(self) -> ForeignKey<O, Settled> {
        self.initially(Initially::Immediate)
    }
}
