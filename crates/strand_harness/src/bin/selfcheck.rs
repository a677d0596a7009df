//! # STRAND Self-Check
//!
//! Runs the container scenarios through the collect-all-failures checker,
//! then times the benchmark workload on `Vector` and the standard
//! containers.
//!
//! Run with: `cargo run --release --bin strand-selfcheck`

use std::collections::{LinkedList, VecDeque};
use std::process::ExitCode;

use strand_core::Vector;
use strand_harness::{scenarios, workload, Checker, Sequence, Timer, WorkloadConfig};

/// Times one workload run on `sequence` under `label`.
fn timed<S: Sequence>(label: &str, mut sequence: S, config: &WorkloadConfig) -> i64 {
    let _timer = Timer::start(label);
    workload::run(&mut sequence, config)
}

fn main() -> ExitCode {
    let mut checker = Checker::new();
    scenarios::run_all(&mut checker);

    let config = WorkloadConfig::default();

    // Untimed warm-up run.
    let mut checksum = workload::run(&mut Vec::<i32>::new(), &config);

    checksum += timed("Vector<i32>", Vector::<i32>::new(), &config);
    checksum += timed("Vec<i32>", Vec::<i32>::new(), &config);
    checksum += timed("VecDeque<i32>", VecDeque::<i32>::new(), &config);
    checksum += timed("LinkedList<i32>", LinkedList::<i32>::new(), &config);

    println!(
        "{} checks, {} failed, checksum {checksum}",
        checker.checks(),
        checker.failures().len()
    );

    if checker.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
