//! # Collect-All-Failures Checks
//!
//! Assertion-style checks that report a mismatch and keep going.
//!
//! Each failed check prints `at line N: <details>` to stdout, logs a
//! warning and is recorded, so one run surfaces every broken expectation
//! instead of stopping at the first.

use std::fmt::{self, Debug};
use std::panic::Location;

/// A single failed check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    /// Source file of the check.
    pub file: &'static str,
    /// Source line of the check.
    pub line: u32,
    /// What went wrong.
    pub message: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at line {}: {}", self.line, self.message)
    }
}

/// Records check outcomes without aborting on failure.
///
/// # Example
///
/// ```rust
/// use strand_harness::{check, Checker};
///
/// let mut checker = Checker::quiet();
/// checker.check_eq(1 + 1, 2);
/// check!(checker, 2 > 3);
///
/// assert_eq!(checker.checks(), 2);
/// assert_eq!(checker.failures().len(), 1);
/// assert_eq!(checker.failures()[0].message, "2 > 3");
/// ```
#[derive(Debug, Default)]
pub struct Checker {
    checks: usize,
    failures: Vec<Failure>,
    quiet: bool,
}

impl Checker {
    /// Creates a checker that prints every failure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a checker that only records failures.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    /// Checks `actual == expected`. Returns whether the check passed.
    #[track_caller]
    pub fn check_eq<A, E>(&mut self, actual: A, expected: E) -> bool
    where
        A: PartialEq<E> + Debug,
        E: Debug,
    {
        self.checks += 1;
        if actual == expected {
            return true;
        }
        self.record(
            Location::caller(),
            format!("{actual:?} != {expected:?}"),
        );
        false
    }

    /// Checks that `condition` holds. Returns whether the check passed.
    ///
    /// `description` is reported on failure; the [`check!`](crate::check)
    /// macro fills it with the condition's source text.
    #[track_caller]
    pub fn check_true(&mut self, condition: bool, description: &str) -> bool {
        self.checks += 1;
        if !condition {
            self.record(Location::caller(), description.to_owned());
        }
        condition
    }

    /// Number of checks performed so far.
    #[inline]
    #[must_use]
    pub fn checks(&self) -> usize {
        self.checks
    }

    /// Failures recorded so far, in order.
    #[inline]
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// `true` if no check has failed.
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, location: &'static Location<'static>, message: String) {
        let failure = Failure {
            file: location.file(),
            line: location.line(),
            message,
        };
        tracing::warn!(
            file = failure.file,
            line = failure.line,
            detail = %failure.message,
            "check failed"
        );
        if !self.quiet {
            println!("{failure}");
        }
        self.failures.push(failure);
    }
}

/// Checks a boolean condition, reporting its source text on failure.
///
/// ```rust
/// use strand_harness::{check, Checker};
///
/// let mut checker = Checker::quiet();
/// let items: Vec<u8> = Vec::new();
/// check!(checker, items.is_empty());
/// assert!(checker.is_clean());
/// ```
#[macro_export]
macro_rules! check {
    ($checker:expr, $condition:expr) => {
        $checker.check_true($condition, stringify!($condition))
    };
}
