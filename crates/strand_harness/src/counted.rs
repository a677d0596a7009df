//! # Instance Counting
//!
//! A value type that keeps a per-thread count of its live instances.
//!
//! Construction and cloning add one, dropping subtracts one. Lifecycle
//! checks compare [`Counted::live`] before and after container operations
//! to prove that exactly the logically present elements are alive.
//!
//! The counter is thread-local, so tests running in parallel on separate
//! threads do not see each other's instances.

use std::cell::Cell;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn adjust(delta: isize) {
    LIVE.with(|live| live.set(live.get() + delta));
}

/// A value whose live instances are counted on the current thread.
#[derive(Debug, PartialEq, Eq)]
pub struct Counted {
    tag: u32,
}

impl Counted {
    /// Creates a counted value carrying `tag`.
    #[must_use]
    pub fn new(tag: u32) -> Self {
        adjust(1);
        Self { tag }
    }

    /// The tag this value was created with.
    #[inline]
    #[must_use]
    pub fn tag(&self) -> u32 {
        self.tag
    }

    /// Number of `Counted` values alive on the current thread.
    #[must_use]
    pub fn live() -> isize {
        LIVE.with(Cell::get)
    }
}

impl Default for Counted {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for Counted {
    fn clone(&self) -> Self {
        Self::new(self.tag)
    }
}

impl Drop for Counted {
    fn drop(&mut self) {
        adjust(-1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_clone_drop() {
        assert_eq!(Counted::live(), 0);
        let first = Counted::new(7);
        let second = first.clone();
        assert_eq!(second.tag(), 7);
        assert_eq!(Counted::live(), 2);

        drop(first);
        assert_eq!(Counted::live(), 1);
        drop(second);
        assert_eq!(Counted::live(), 0);
    }

    #[test]
    fn test_moves_are_free() {
        let values: Vec<Counted> = (0..5).map(Counted::new).collect();
        assert_eq!(Counted::live(), 5);
        let moved = values;
        assert_eq!(moved.len(), 5);
        assert_eq!(Counted::live(), 5);
    }
}
