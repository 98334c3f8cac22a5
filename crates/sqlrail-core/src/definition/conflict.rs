//! The `ON CONFLICT` clause of PRIMARY KEY, NOT NULL and UNIQUE constraints.

/// Conflict resolution algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    /// `ROLLBACK`
    Rollback,
    /// `ABORT`
    Abort,
    /// `FAIL`
    Fail,
    /// `IGNORE`
    Ignore,
    /// `REPLACE`
    Replace,
}

impl ConflictResolution {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Rollback => "ROLLBACK",
            Self::Abort => "ABORT",
            Self::Fail => "FAIL",
            Self::Ignore => "IGNORE",
            Self::Replace => "REPLACE",
        }
    }
}

pub(crate) fn render_conflict(resolution: Option<ConflictResolution>, buf: &mut String) {
    if let Some(resolution) = resolution {
        buf.push_str(" ON CONFLICT ");
        buf.push_str(resolution.as_sql());
    }
}

/// A constraint that accepts a conflict clause.
///
/// `Output` is the state the builder continues from once a resolution has
/// been picked.
pub trait ConflictTarget {
    /// State reached after the resolution.
    type Output;

    /// Records `resolution` and moves on.
    fn resolve(self, resolution: ConflictResolution) -> Self::Output;
}

/// `ON CONFLICT`, waiting for the resolution keyword.
#[derive(Debug, Clone)]
#[must_use]
pub struct OnConflict<T> {
    target: T,
}

impl<T: ConflictTarget> OnConflict<T> {
    pub(crate) const fn new(target: T) -> Self {
        Self { target }
    }

    /// `ON CONFLICT ROLLBACK`
    pub fn rollback(self) -> T::Output {
        self.target.resolve(ConflictResolution::Rollback)
    }

    /// `ON CONFLICT ABORT`
    pub fn abort(self) -> T::Output {
        self.target.resolve(ConflictResolution::Abort)
    }

    /// `ON CONFLICT FAIL`
    pub fn fail(self) -> T::Output {
        self.target.resolve(ConflictResolution::Fail)
    }

    /// `ON CONFLICT IGNORE`
    pub fn ignore(self) -> T::Output {
        self.target.resolve(ConflictResolution::Ignore)
    }

    /// `ON CONFLICT REPLACE`
    pub fn replace(self) -> T::Output {
        self.target.resolve(ConflictResolution::Replace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl ConflictTarget for Probe {
        type Output = String;

        fn resolve(self, resolution: ConflictResolution) -> String {
            let mut buf = String::from("NOT NULL");
            render_conflict(Some(resolution), &mut buf);
            buf
        }
    }

    #[test]
    fn test_each_resolution() {
        assert_eq!(OnConflict::new(Probe).rollback(), "NOT NULL ON CONFLICT ROLLBACK");
        assert_eq!(OnConflict::new(Probe).abort(), "NOT NULL ON CONFLICT ABORT");
        assert_eq!(OnConflict::new(Probe).fail(), "NOT NULL ON CONFLICT FAIL");
        assert_eq!(OnConflict::new(Probe).ignore(), "NOT NULL ON CONFLICT IGNORE");
        assert_eq!(OnConflict::new(Probe).replace(), "NOT NULL ON CONFLICT REPLACE");
    }

    #[test]
    fn test_no_resolution_renders_nothing() {
        let mut buf = String::from("UNIQUE");
        render_conflict(None, &mut buf);
        assert_eq!(buf, "UNIQUE");
    }
}
