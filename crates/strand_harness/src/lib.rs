//! # STRAND Harness
//!
//! Drives [`strand_core`] from the outside, the way an application would.
//!
//! - [`Checker`] - assertion-style checks that record and continue
//! - [`Counted`] - value type that counts its live instances
//! - [`Timer`] - scope timer reporting microseconds
//! - [`workload`] - the append / resize / pop benchmark sequence
//! - [`scenarios`] - end-to-end container walks used by `strand-selfcheck`

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod check;
pub mod counted;
pub mod scenarios;
pub mod timer;
pub mod workload;

pub use check::{Checker, Failure};
pub use counted::Counted;
pub use timer::Timer;
pub use workload::{Sequence, WorkloadConfig};
