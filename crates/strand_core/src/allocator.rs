//! # Allocators
//!
//! Raw, byte-level buffer providers for [`Vector`](crate::Vector).
//!
//! An allocator hands out uninitialised buffers sized in elements, grows
//! them while keeping the bytes of their live prefix, and takes them back.
//! It never constructs or drops elements; that is the container's job.
//!
//! Allocation failure is fatal and goes through
//! [`std::alloc::handle_alloc_error`]. Zero-byte requests (empty buffers or
//! zero-sized element types) never reach the global allocator and return a
//! dangling, well-aligned pointer instead.

// SAFETY: This module requires unsafe to talk to the global allocator.
// Every block states the invariant it relies on.
#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::cell::Cell;
use std::mem;
use std::ptr::{self, NonNull};

/// A raw memory provider for contiguous element buffers.
///
/// Methods are generic over the element type, so one allocator value can
/// serve any container that owns it. Implementations are substituted per
/// container instance through [`Vector`](crate::Vector)'s `A` parameter.
pub trait Allocator {
    /// Allocates an uninitialised buffer for `capacity` elements of `T`.
    ///
    /// # Panics
    ///
    /// Panics if the buffer size overflows `isize::MAX` bytes. Aborts through
    /// [`handle_alloc_error`](std::alloc::handle_alloc_error) if the memory
    /// cannot be obtained.
    fn allocate<T>(&self, capacity: usize) -> NonNull<T>;

    /// Returns a buffer to this allocator.
    ///
    /// # Safety
    ///
    /// `buffer` must have been produced by this allocator for exactly
    /// `capacity` elements of `T` and must not be used afterwards. Elements
    /// still stored in it are not dropped.
    unsafe fn release<T>(&self, buffer: NonNull<T>, capacity: usize);

    /// Grows (or shrinks) `buffer` to `new_capacity` elements.
    ///
    /// The first `live` elements of the returned buffer hold the byte image
    /// of the first `live` elements of `buffer`. The old buffer is released.
    ///
    /// The provided implementation allocates a fresh buffer, copies the live
    /// prefix and releases the old one.
    ///
    /// # Safety
    ///
    /// `buffer` must have been produced by this allocator for exactly
    /// `old_capacity` elements of `T`, and `live` must not exceed either
    /// capacity. The old pointer must not be used afterwards.
    unsafe fn reallocate<T>(
        &self,
        buffer: NonNull<T>,
        old_capacity: usize,
        live: usize,
        new_capacity: usize,
    ) -> NonNull<T> {
        // SAFETY: forwarded from this function's contract.
        unsafe { relocate(self, buffer, old_capacity, live, new_capacity) }
    }
}

/// Layout of a buffer holding `capacity` elements of `T`.
///
/// # Panics
///
/// Panics if the total size overflows `isize::MAX` bytes.
pub(crate) fn array_layout<T>(capacity: usize) -> Layout {
    match Layout::array::<T>(capacity) {
        Ok(layout) => layout,
        Err(_) => panic!(
            "capacity overflow: {capacity} elements of {} bytes",
            mem::size_of::<T>()
        ),
    }
}

/// Moves the live prefix of `buffer` into a fresh buffer from `allocator`.
///
/// # Safety
///
/// Same contract as [`Allocator::reallocate`].
unsafe fn relocate<A, T>(
    allocator: &A,
    buffer: NonNull<T>,
    old_capacity: usize,
    live: usize,
    new_capacity: usize,
) -> NonNull<T>
where
    A: Allocator + ?Sized,
{
    debug_assert!(live <= old_capacity && live <= new_capacity);

    let fresh = allocator.allocate::<T>(new_capacity);
    // SAFETY: `fresh` is a new allocation, so the regions cannot overlap.
    // Both buffers hold at least `live` slots, and the old buffer came from
    // `allocator` with `old_capacity` per the caller's contract.
    unsafe {
        ptr::copy_nonoverlapping(buffer.as_ptr(), fresh.as_ptr(), live);
        allocator.release(buffer, old_capacity);
    }
    fresh
}

/// The global heap allocator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Heap;

impl Allocator for Heap {
    fn allocate<T>(&self, capacity: usize) -> NonNull<T> {
        let layout = array_layout::<T>(capacity);
        if layout.size() == 0 {
            return NonNull::dangling();
        }

        // SAFETY: the layout has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        match NonNull::new(raw.cast::<T>()) {
            Some(buffer) => buffer,
            None => alloc::handle_alloc_error(layout),
        }
    }

    unsafe fn release<T>(&self, buffer: NonNull<T>, capacity: usize) {
        let layout = array_layout::<T>(capacity);
        if layout.size() == 0 {
            return;
        }

        // SAFETY: the caller guarantees `buffer` came from `allocate` with
        // this capacity, so it was allocated with exactly this layout.
        unsafe { alloc::dealloc(buffer.as_ptr().cast::<u8>(), layout) }
    }

    unsafe fn reallocate<T>(
        &self,
        buffer: NonNull<T>,
        old_capacity: usize,
        live: usize,
        new_capacity: usize,
    ) -> NonNull<T> {
        debug_assert!(live <= old_capacity && live <= new_capacity);

        let old_layout = array_layout::<T>(old_capacity);
        let new_layout = array_layout::<T>(new_capacity);
        if old_layout.size() == 0 || new_layout.size() == 0 {
            // SAFETY: forwarded from this function's contract.
            return unsafe { relocate(self, buffer, old_capacity, live, new_capacity) };
        }

        // SAFETY: `buffer` was allocated by this allocator with `old_layout`,
        // the new size is non-zero and fits `isize::MAX` (checked by
        // `array_layout`). `realloc` keeps min(old, new) bytes, which covers
        // the `live` prefix.
        let raw = unsafe {
            alloc::realloc(
                buffer.as_ptr().cast::<u8>(),
                old_layout,
                new_layout.size(),
            )
        };
        match NonNull::new(raw.cast::<T>()) {
            Some(buffer) => buffer,
            None => alloc::handle_alloc_error(new_layout),
        }
    }
}

/// Counters kept by a [`Tracking`] allocator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Number of fresh buffers handed out.
    pub allocations: usize,
    /// Number of grow/shrink calls.
    pub reallocations: usize,
    /// Number of buffers taken back.
    pub releases: usize,
    /// Bytes currently held by live buffers.
    pub bytes_in_use: usize,
    /// Highest value `bytes_in_use` has reached.
    pub peak_bytes: usize,
}

/// An allocator that counts what its inner allocator does.
///
/// Used to observe a container's growth behavior without touching the
/// container itself. Counters live in a [`Cell`], so the tracker is
/// single-threaded.
///
/// # Example
///
/// ```rust
/// use strand_core::{Heap, Tracking, Vector};
///
/// let mut v = Vector::with_allocator(Tracking::new(Heap));
/// for i in 0..1000 {
///     v.push_back(i);
/// }
/// assert!(v.allocator().stats().reallocations < 20);
/// ```
#[derive(Debug, Default)]
pub struct Tracking<A = Heap> {
    inner: A,
    stats: Cell<AllocStats>,
}

impl<A> Tracking<A> {
    /// Wraps `inner` with zeroed counters.
    #[must_use]
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            stats: Cell::new(AllocStats::default()),
        }
    }

    /// Returns a snapshot of the counters.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> AllocStats {
        self.stats.get()
    }

    /// Returns the wrapped allocator.
    #[inline]
    #[must_use]
    pub fn inner(&self) -> &A {
        &self.inner
    }

    fn record(&self, update: impl FnOnce(&mut AllocStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        stats.peak_bytes = stats.peak_bytes.max(stats.bytes_in_use);
        self.stats.set(stats);
    }
}

impl<A: Allocator> Allocator for Tracking<A> {
    fn allocate<T>(&self, capacity: usize) -> NonNull<T> {
        let buffer = self.inner.allocate::<T>(capacity);
        let bytes = array_layout::<T>(capacity).size();
        self.record(|stats| {
            stats.allocations += 1;
            stats.bytes_in_use += bytes;
        });
        buffer
    }

    unsafe fn release<T>(&self, buffer: NonNull<T>, capacity: usize) {
        // SAFETY: forwarded from this function's contract.
        unsafe { self.inner.release(buffer, capacity) };
        let bytes = array_layout::<T>(capacity).size();
        self.record(|stats| {
            stats.releases += 1;
            stats.bytes_in_use -= bytes;
        });
    }

    unsafe fn reallocate<T>(
        &self,
        buffer: NonNull<T>,
        old_capacity: usize,
        live: usize,
        new_capacity: usize,
    ) -> NonNull<T> {
        // SAFETY: forwarded from this function's contract.
        let buffer = unsafe {
            self.inner
                .reallocate(buffer, old_capacity, live, new_capacity)
        };
        let old_bytes = array_layout::<T>(old_capacity).size();
        let new_bytes = array_layout::<T>(new_capacity).size();
        self.record(|stats| {
            stats.reallocations += 1;
            stats.bytes_in_use = stats.bytes_in_use - old_bytes + new_bytes;
        });
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Allocator that only supplies `allocate`/`release` and relies on the
    /// provided `reallocate`.
    struct Plain;

    impl Allocator for Plain {
        fn allocate<T>(&self, capacity: usize) -> NonNull<T> {
            Heap.allocate(capacity)
        }

        unsafe fn release<T>(&self, buffer: NonNull<T>, capacity: usize) {
            // SAFETY: `allocate` hands out heap buffers.
            unsafe { Heap.release(buffer, capacity) }
        }
    }

    fn fill(buffer: NonNull<u64>, count: usize) {
        for i in 0..count {
            // SAFETY: callers pass a count within the buffer's capacity.
            unsafe { buffer.as_ptr().add(i).write(i as u64 * 10) };
        }
    }

    fn read(buffer: NonNull<u64>, count: usize) -> Vec<u64> {
        (0..count)
            // SAFETY: callers pass a count of initialised slots.
            .map(|i| unsafe { buffer.as_ptr().add(i).read() })
            .collect()
    }

    #[test]
    fn test_heap_reallocate_keeps_live_prefix() {
        let buffer = Heap.allocate::<u64>(4);
        fill(buffer, 3);

        // SAFETY: `buffer` holds 4 slots, 3 of them written.
        let grown = unsafe { Heap.reallocate(buffer, 4, 3, 1024) };
        assert_eq!(read(grown, 3), vec![0, 10, 20]);

        // SAFETY: `grown` was reallocated to 1024 slots.
        unsafe { Heap.release(grown, 1024) };
    }

    #[test]
    fn test_provided_reallocate_keeps_live_prefix() {
        let buffer = Plain.allocate::<u64>(2);
        fill(buffer, 2);

        // SAFETY: `buffer` holds 2 written slots.
        let grown = unsafe { Plain.reallocate(buffer, 2, 2, 3) };
        assert_eq!(read(grown, 2), vec![0, 10]);

        // SAFETY: `grown` was reallocated to 3 slots.
        unsafe { Plain.release(grown, 3) };
    }

    #[test]
    fn test_zero_sized_requests_do_not_allocate() {
        let tracking = Tracking::new(Heap);
        let empty = tracking.allocate::<u64>(0);
        let units = tracking.allocate::<()>(1_000);
        assert_eq!(tracking.stats().bytes_in_use, 0);

        // SAFETY: both buffers came from `tracking` with these capacities.
        unsafe {
            tracking.release(empty, 0);
            tracking.release(units, 1_000);
        }
        assert_eq!(tracking.stats().releases, 2);
    }

    #[test]
    fn test_tracking_counts_bytes() {
        let tracking = Tracking::new(Heap);
        let buffer = tracking.allocate::<u32>(8);
        assert_eq!(tracking.stats().bytes_in_use, 32);

        // SAFETY: `buffer` holds 8 slots, none live.
        let buffer = unsafe { tracking.reallocate(buffer, 8, 0, 16) };
        let stats = tracking.stats();
        assert_eq!(stats.allocations, 1);
        assert_eq!(stats.reallocations, 1);
        assert_eq!(stats.bytes_in_use, 64);

        // SAFETY: `buffer` was reallocated to 16 slots.
        unsafe { tracking.release(buffer, 16) };
        let stats = tracking.stats();
        assert_eq!(stats.bytes_in_use, 0);
        assert_eq!(stats.peak_bytes, 64);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_layout_overflow_panics() {
        let _ = Heap.allocate::<u64>(usize::MAX);
    }
}
