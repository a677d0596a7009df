//! # Container Scenarios
//!
//! End-to-end walks through the public [`Vector`] API, reported through a
//! [`Checker`] so that every mismatch in a run is surfaced.

use strand_core::{Heap, Tracking, Vector, VectorConfig};

use crate::check;
use crate::check::Checker;
use crate::counted::Counted;

/// Append, pop, cursor traversal, reserve and resize on `Vector<i32>`.
pub fn container_basics(checker: &mut Checker) {
    let mut v: Vector<i32> = Vector::new();

    check!(checker, v.is_empty());
    checker.check_eq(v.len(), 0);

    v.push_back(1);

    check!(checker, !v.is_empty());
    checker.check_eq(v.len(), 1);
    checker.check_eq(v[0], 1);

    checker.check_eq(v.pop_back(), Some(1));

    check!(checker, v.is_empty());
    checker.check_eq(v.len(), 0);

    v.push_back(3);
    v.push_back(2);
    v.push_back(1);

    check!(checker, !v.is_empty());
    checker.check_eq(v.len(), 3);
    checker.check_eq(v[0], 3);
    checker.check_eq(v[1], 2);
    checker.check_eq(v[2], 1);

    let mut r = v.rbegin();
    for expected in [1, 2, 3] {
        check!(checker, r != v.rend());
        checker.check_eq(r.get(), Some(&expected));
        r.advance();
    }
    check!(checker, r == v.rend());

    let mut f = v.begin();
    for expected in [3, 2, 1] {
        check!(checker, f != v.end());
        checker.check_eq(f.get(), Some(&expected));
        f.advance();
    }
    check!(checker, f == v.end());

    v.reserve(10_000);
    checker.check_eq(v.len(), 3);
    check!(checker, v.capacity() >= 10_000);

    let capacity = v.capacity();

    v.resize(2);
    checker.check_eq(v.len(), 2);
    checker.check_eq(v.capacity(), capacity);
    checker.check_eq(v[0], 3);
    checker.check_eq(v[1], 2);

    v.resize(3);
    checker.check_eq(v.len(), 3);
    checker.check_eq(v.capacity(), capacity);
    checker.check_eq(v[0], 3);
    checker.check_eq(v[1], 2);
    checker.check_eq(v[2], 0);

    v.resize(0);
    checker.check_eq(v.len(), 0);
    check!(checker, v.begin() == v.end());

    v.resize(2);
    checker.check_eq(v.len(), 2);
    checker.check_eq(v[0], 0);
    checker.check_eq(v[1], 0);

    let ones: Vector<i32> = [1, 1, 1].into_iter().collect();
    checker.check_eq(ones.begin().count(), 3);
    checker.check_eq(ones.rbegin().count(), 3);
}

/// Live-instance accounting across resizes, appends, pops and clear.
pub fn element_lifecycle(checker: &mut Checker) {
    let baseline = Counted::live();
    {
        let mut v: Vector<Counted> = Vector::new();
        v.resize(100);

        checker.check_eq(Counted::live() - baseline, 100);

        for tag in 0..14 {
            v.push_back(Counted::new(tag));
        }

        checker.check_eq(Counted::live() - baseline, 114);

        v.resize(150);

        checker.check_eq(Counted::live() - baseline, 150);

        for _ in 0..100 {
            let _ = v.pop_back();
        }

        checker.check_eq(Counted::live() - baseline, 50);

        v.resize(25);

        checker.check_eq(Counted::live() - baseline, 25);

        v.clear();

        checker.check_eq(Counted::live() - baseline, 0);

        v.resize(25);

        checker.check_eq(Counted::live() - baseline, 25);
    }

    checker.check_eq(Counted::live() - baseline, 0);
}

/// Reallocation counts under the doubling and exact growth policies.
pub fn growth_policy(checker: &mut Checker) {
    let mut doubling = Vector::with_allocator(Tracking::new(Heap));
    let mut exact = Vector::with_config(VectorConfig::exact(), Tracking::new(Heap));
    for value in 0..1000 {
        doubling.push_back(value);
        exact.push_back(value);
    }

    checker.check_eq(exact.allocator().stats().reallocations, 999);
    check!(checker, doubling.allocator().stats().reallocations <= 10);
    checker.check_eq(doubling.as_slice(), exact.as_slice());
}

/// Runs every scenario in order.
pub fn run_all(checker: &mut Checker) {
    container_basics(checker);
    element_lifecycle(checker);
    growth_policy(checker);
}
