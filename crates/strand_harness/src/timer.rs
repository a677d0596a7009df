//! # Scope Timer
//!
//! Measures wall-clock time from construction to drop and reports it in
//! microseconds.

use std::time::{Duration, Instant};

/// Prints `<label>: <micros> us` when dropped.
///
/// # Example
///
/// ```rust,ignore
/// {
///     let _timer = Timer::start("Vector<i32>");
///     workload::run(&mut vector, &config);
/// } // prints "Vector<i32>: 81234 us"
/// ```
#[derive(Debug)]
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    /// Starts timing a scope named `label`.
    #[must_use]
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }

    /// Time elapsed since the timer started.
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The label this timer reports under.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let micros = u64::try_from(self.elapsed().as_micros()).unwrap_or(u64::MAX);
        tracing::info!(label = %self.label, micros, "scope timed");
        println!("{}: {micros} us", self.label);
    }
}
