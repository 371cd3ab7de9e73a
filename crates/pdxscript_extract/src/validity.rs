//! Accumulated validation outcome for one object.
//!
//! Extraction keeps going after a bad field so that one pass reports every
//! problem in an object. A [`Validity`] collects the pass/fail outcome of
//! each field from the operations' return values and is inspected once at
//! the end.

/// Pass/fail accumulator threaded across the fields of one object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Validity {
    failures: usize,
}

impl Validity {
    /// A fresh, valid accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self { failures: 0 }
    }

    /// Records the outcome of one operation and passes its value through.
    pub fn check<T>(&mut self, outcome: Option<T>) -> Option<T> {
        if outcome.is_none() {
            self.fail();
        }
        outcome
    }

    /// Like [`Validity::check`], substituting `default` on failure.
    pub fn check_or<T>(&mut self, outcome: Option<T>, default: T) -> T {
        self.check(outcome).unwrap_or(default)
    }

    /// Records one failure.
    pub fn fail(&mut self) {
        self.failures += 1;
    }

    /// Folds in the outcome of a sub-object.
    pub fn merge(&mut self, other: Self) {
        self.failures += other.failures;
    }

    /// Returns true if nothing has failed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.failures == 0
    }

    /// Number of failed operations.
    #[must_use]
    pub const fn failures(&self) -> usize {
        self.failures
    }
}
