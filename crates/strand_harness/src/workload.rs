//! # Benchmark Workload
//!
//! The append / iterate / resize / pop / clear sequence used to compare
//! [`Vector`] against the standard containers.
//!
//! One round, for `n = elements`:
//!
//! 1. push `n / 2` values, sum
//! 2. resize to `n / 4`, sum
//! 3. resize to `n`, sum
//! 4. pop `n / 2` values, sum
//! 5. push `n / 2` values, sum
//! 6. clear
//!
//! Every container runs the same operations, so the returned checksum must
//! match across containers.

use std::collections::{LinkedList, VecDeque};

use serde::{Deserialize, Serialize};
use strand_core::{Allocator, Vector};

/// Workload size, parsed once from TOML or taken from the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfig {
    /// Number of rounds.
    pub rounds: usize,
    /// Peak element count per round.
    pub elements: usize,
}

impl WorkloadConfig {
    /// Default number of rounds.
    pub const DEFAULT_ROUNDS: usize = 20;
    /// Default peak element count.
    pub const DEFAULT_ELEMENTS: usize = 1_000_000;

    /// Parses a workload from TOML text; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text does not match the schema.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            rounds: Self::DEFAULT_ROUNDS,
            elements: Self::DEFAULT_ELEMENTS,
        }
    }
}

/// The operations the workload needs from a container of `i32`.
pub trait Sequence {
    /// Appends a value.
    fn push_back(&mut self, value: i32);
    /// Removes the last value, if any.
    fn pop_back(&mut self);
    /// Resizes to `len`, filling new slots with zero.
    fn resize(&mut self, len: usize);
    /// Removes every value.
    fn clear(&mut self);
    /// Sum of all values, in iteration order.
    fn sum(&self) -> i64;
}

impl<A: Allocator> Sequence for Vector<i32, A> {
    fn push_back(&mut self, value: i32) {
        Vector::push_back(self, value);
    }

    fn pop_back(&mut self) {
        let _ = Vector::pop_back(self);
    }

    fn resize(&mut self, len: usize) {
        Vector::resize(self, len);
    }

    fn clear(&mut self) {
        Vector::clear(self);
    }

    fn sum(&self) -> i64 {
        self.begin().map(|&value| i64::from(value)).sum()
    }
}

impl Sequence for Vec<i32> {
    fn push_back(&mut self, value: i32) {
        self.push(value);
    }

    fn pop_back(&mut self) {
        let _ = self.pop();
    }

    fn resize(&mut self, len: usize) {
        Vec::resize(self, len, 0);
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn sum(&self) -> i64 {
        self.iter().map(|&value| i64::from(value)).sum()
    }
}

impl Sequence for VecDeque<i32> {
    fn push_back(&mut self, value: i32) {
        VecDeque::push_back(self, value);
    }

    fn pop_back(&mut self) {
        let _ = VecDeque::pop_back(self);
    }

    fn resize(&mut self, len: usize) {
        VecDeque::resize(self, len, 0);
    }

    fn clear(&mut self) {
        VecDeque::clear(self);
    }

    fn sum(&self) -> i64 {
        self.iter().map(|&value| i64::from(value)).sum()
    }
}

impl Sequence for LinkedList<i32> {
    fn push_back(&mut self, value: i32) {
        LinkedList::push_back(self, value);
    }

    fn pop_back(&mut self) {
        let _ = LinkedList::pop_back(self);
    }

    fn resize(&mut self, len: usize) {
        if len <= self.len() {
            drop(self.split_off(len));
            return;
        }
        let missing = len - self.len();
        self.extend(std::iter::repeat(0).take(missing));
    }

    fn clear(&mut self) {
        LinkedList::clear(self);
    }

    fn sum(&self) -> i64 {
        self.iter().map(|&value| i64::from(value)).sum()
    }
}

/// Runs the workload on `sequence` and returns the accumulated checksum.
///
/// The sequence is expected to start empty and is left empty.
pub fn run<S: Sequence + ?Sized>(sequence: &mut S, config: &WorkloadConfig) -> i64 {
    let half = config.elements / 2;
    let quarter = config.elements / 4;

    let mut total = 0_i64;
    for round in 0..config.rounds {
        let offset = i32::try_from(round).unwrap_or(i32::MAX);

        append(sequence, half, offset);
        total += sequence.sum();

        sequence.resize(quarter);
        total += sequence.sum();

        sequence.resize(config.elements);
        total += sequence.sum();

        for _ in 0..half {
            sequence.pop_back();
        }
        total += sequence.sum();

        append(sequence, half, offset);
        total += sequence.sum();

        sequence.clear();
    }
    total
}

fn append<S: Sequence + ?Sized>(sequence: &mut S, count: usize, offset: i32) {
    for index in 0..count {
        let value = i32::try_from(index).unwrap_or(i32::MAX);
        sequence.push_back(value.wrapping_add(offset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> WorkloadConfig {
        WorkloadConfig {
            rounds: 3,
            elements: 40,
        }
    }

    #[test]
    fn test_single_round_checksum() {
        let config = WorkloadConfig {
            rounds: 1,
            elements: 8,
        };
        let mut values: Vec<i32> = Vec::new();
        // push 0..4 = 6; resize 2 -> 1; resize 8 -> 1; pop 4 -> 1; push 0..4 -> 7
        assert_eq!(run(&mut values, &config), 6 + 1 + 1 + 1 + 7);
        assert!(values.is_empty());
    }

    #[test]
    fn test_all_containers_agree() {
        let config = small();
        let expected = run(&mut Vec::<i32>::new(), &config);

        assert_eq!(run(&mut Vector::<i32>::new(), &config), expected);
        assert_eq!(run(&mut VecDeque::<i32>::new(), &config), expected);
        assert_eq!(run(&mut LinkedList::<i32>::new(), &config), expected);
    }

    #[test]
    fn test_config_from_toml() {
        let config = WorkloadConfig::from_toml_str("rounds = 2").unwrap();
        assert_eq!(config.rounds, 2);
        assert_eq!(config.elements, WorkloadConfig::DEFAULT_ELEMENTS);
        assert!(WorkloadConfig::from_toml_str("rounds = \"many\"").is_err());
    }
}
