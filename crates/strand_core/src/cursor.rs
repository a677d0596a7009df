//! # Cursors
//!
//! Direction-aware positions over a contiguous run of elements.
//!
//! A forward cursor walks `[0, len)` and stops at the sentinel `len`. A
//! backward cursor walks `len - 1` down to `0` and stops at the sentinel
//! "before-begin" (`-1`). The sentinel is never dereferenceable and
//! advancing from it does nothing.
//!
//! ```text
//!  before-begin   0     1     2    len
//!       |      [ a ] [ b ] [ c ]    |
//!   rend()                  rbegin() end()
//!             begin()
//! ```
//!
//! Two cursors are equal when they sit on the same position of the same run.
//! Element values never take part in the comparison, so runs holding
//! duplicate values iterate to the end.

use std::iter::FusedIterator;
use std::ptr;

/// Traversal direction of a [`Cursor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From the first element towards the last.
    Forward,
    /// From the last element towards the first.
    Backward,
}

impl Direction {
    /// Signed position delta of one step.
    #[inline]
    #[must_use]
    pub const fn step(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// A cursor over a borrowed run of elements.
///
/// The borrow ties the cursor to its container, so a reallocating operation
/// cannot happen while the cursor is alive.
///
/// # Example
///
/// ```rust
/// use strand_core::Vector;
///
/// let v: Vector<i32> = [3, 2, 1].into_iter().collect();
///
/// let mut it = v.rbegin();
/// let mut seen = Vec::new();
/// while it != v.rend() {
///     seen.push(*it.get().unwrap());
///     it.advance();
/// }
/// assert_eq!(seen, [1, 2, 3]);
/// ```
#[derive(Debug)]
pub struct Cursor<'a, T> {
    items: &'a [T],
    position: isize,
    sentinel: isize,
    direction: Direction,
}

impl<'a, T> Cursor<'a, T> {
    /// Cursor on the first element of `items`, walking forward.
    #[must_use]
    pub fn forward(items: &'a [T]) -> Self {
        Self::new(items, 0, span(items), Direction::Forward)
    }

    /// Forward sentinel of `items` (one past the last element).
    #[must_use]
    pub fn forward_end(items: &'a [T]) -> Self {
        let end = span(items);
        Self::new(items, end, end, Direction::Forward)
    }

    /// Cursor on the last element of `items`, walking backward.
    #[must_use]
    pub fn backward(items: &'a [T]) -> Self {
        Self::new(items, span(items) - 1, -1, Direction::Backward)
    }

    /// Backward sentinel of `items` (one before the first element).
    #[must_use]
    pub fn backward_end(items: &'a [T]) -> Self {
        Self::new(items, -1, -1, Direction::Backward)
    }

    fn new(items: &'a [T], position: isize, sentinel: isize, direction: Direction) -> Self {
        Self {
            items,
            position,
            sentinel,
            direction,
        }
    }

    /// Moves one step in the cursor's direction.
    ///
    /// Does nothing once the sentinel is reached.
    #[inline]
    pub fn advance(&mut self) {
        if self.position != self.sentinel {
            self.position += self.direction.step();
        }
    }

    /// Returns the element under the cursor, or `None` if the cursor is on a
    /// sentinel.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        let items: &'a [T] = self.items;
        usize::try_from(self.position)
            .ok()
            .and_then(|index| items.get(index))
    }

    /// Index of the element under the cursor, or `None` on a sentinel.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        usize::try_from(self.position)
            .ok()
            .filter(|&index| index < self.items.len())
    }

    /// Direction this cursor advances in.
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// `true` once the cursor has reached its sentinel.
    #[inline]
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.position == self.sentinel
    }

    fn remaining(&self) -> usize {
        (self.sentinel - self.position).unsigned_abs()
    }
}

/// Signed length of a run.
fn span<T>(items: &[T]) -> isize {
    isize::try_from(items.len()).unwrap_or(isize::MAX)
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.items, other.items) && self.position == other.position
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }
        let item = self.get();
        self.advance();
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

impl<T> FusedIterator for Cursor<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_walk() {
        let items = [3, 2, 1];
        let mut cursor = Cursor::forward(&items);
        let end = Cursor::forward_end(&items);

        let mut seen = Vec::new();
        while cursor != end {
            seen.push(*cursor.get().unwrap());
            cursor.advance();
        }
        assert_eq!(seen, [3, 2, 1]);
        assert!(cursor.get().is_none());
    }

    #[test]
    fn test_backward_walk() {
        let items = [3, 2, 1];
        let seen: Vec<_> = Cursor::backward(&items).copied().collect();
        assert_eq!(seen, [1, 2, 3]);
    }

    #[test]
    fn test_advance_at_sentinel_is_noop() {
        let items = [7];
        let mut cursor = Cursor::backward(&items);
        cursor.advance();
        assert!(cursor.is_exhausted());
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor, Cursor::backward_end(&items));
        assert_eq!(cursor.position(), None);
    }

    #[test]
    fn test_duplicates_do_not_stop_traversal() {
        let items = [1, 1, 1];
        let begin = Cursor::forward(&items);
        let end = Cursor::forward_end(&items);
        assert_ne!(begin, end);
        assert_eq!(begin.count(), 3);
    }

    #[test]
    fn test_equal_values_in_different_runs_differ() {
        let left = [5];
        let right = [5];
        assert_ne!(Cursor::forward(&left), Cursor::forward(&right));
    }

    #[test]
    fn test_empty_run() {
        let items: [u8; 0] = [];
        assert_eq!(Cursor::forward(&items), Cursor::forward_end(&items));
        assert_eq!(Cursor::backward(&items), Cursor::backward_end(&items));
        assert!(Cursor::backward(&items).get().is_none());
    }

    #[test]
    fn test_size_hint_is_exact() {
        let items = [1, 2, 3, 4];
        let mut cursor = Cursor::backward(&items);
        assert_eq!(cursor.len(), 4);
        cursor.advance();
        assert_eq!(cursor.len(), 3);
        assert_eq!(Cursor::forward_end(&items).len(), 0);
    }
}
