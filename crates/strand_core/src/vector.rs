//! # Vector
//!
//! A growable, contiguous container that owns one buffer obtained from a
//! pluggable [`Allocator`].
//!
//! ## Storage rules
//!
//! - `len <= capacity` at all times
//! - Slots `[0, len)` are initialised, slots `[len, capacity)` are not
//! - Capacity only grows; shrinking operations drop elements and keep the
//!   buffer
//! - A fresh vector has capacity 0 and owns no allocation
//!
//! ## Growth
//!
//! [`reserve`](Vector::reserve) grows to exactly the requested capacity.
//! Appends and growing resizes ask the vector's [`VectorConfig`] for the next
//! capacity; the default policy doubles, which keeps appends amortized O(1).
//!
//! ## Reference invalidation
//!
//! Element references and [`Cursor`]s borrow the vector, so the borrow
//! checker rejects any reallocating call (`reserve`, growing resizes,
//! `push_back` into a full buffer) while one is alive.

// SAFETY: This module manages an uninitialised buffer by hand.
// Every block states the invariant it relies on.
#![allow(unsafe_code)]

use std::alloc::Layout;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr::{self, NonNull};
use std::slice::{self, SliceIndex};

use bytemuck::Zeroable;

use crate::allocator::{Allocator, Heap};
use crate::config::VectorConfig;
use crate::cursor::Cursor;
use crate::error::{VectorError, VectorResult};

/// A growable array with a pluggable allocator.
///
/// # Type Parameters
///
/// * `T` - The element type
/// * `A` - The allocator that provides the buffer (defaults to [`Heap`])
///
/// # Thread Safety
///
/// This container is NOT thread-safe and is neither `Send` nor `Sync`.
///
/// # Example
///
/// ```rust
/// use strand_core::Vector;
///
/// let mut v = Vector::new();
/// v.push_back(3);
/// v.push_back(2);
/// v.push_back(1);
/// assert_eq!(v.len(), 3);
/// assert_eq!(v[0], 3);
///
/// v.reserve(10_000);
/// assert!(v.capacity() >= 10_000);
///
/// v.resize(2);
/// v.resize(3);
/// assert_eq!(v, [3, 2, 0]);
/// ```
pub struct Vector<T, A: Allocator = Heap> {
    /// Start of the buffer. Dangling while `capacity` is 0.
    buffer: NonNull<T>,
    /// Allocated slot count.
    capacity: usize,
    /// Initialised slot count.
    len: usize,
    /// Growth policy for appends and resizes.
    config: VectorConfig,
    /// Buffer provider.
    alloc: A,
    /// The vector owns values of `T`.
    _owns: PhantomData<T>,
}

impl<T> Vector<T> {
    /// Creates an empty vector on the global heap.
    ///
    /// No memory is allocated until the first element arrives.
    #[must_use]
    pub fn new() -> Self {
        Self::with_allocator(Heap)
    }

    /// Creates an empty vector with room for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if the buffer size overflows `isize::MAX` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut vector = Self::new();
        vector.reserve(capacity);
        vector
    }
}

impl<T, A: Allocator> Vector<T, A> {
    /// Creates an empty vector backed by `alloc`, with the default config.
    #[must_use]
    pub fn with_allocator(alloc: A) -> Self {
        Self::with_config(VectorConfig::default(), alloc)
    }

    /// Creates an empty vector backed by `alloc` and growing per `config`.
    #[must_use]
    pub fn with_config(config: VectorConfig, alloc: A) -> Self {
        Self {
            buffer: NonNull::dangling(),
            capacity: 0,
            len: 0,
            config,
            alloc,
            _owns: PhantomData,
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the growth configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &VectorConfig {
        &self.config
    }

    /// Returns the allocator backing this vector.
    #[inline]
    #[must_use]
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns the elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the buffer is non-null and aligned (dangling only when
        // nothing is stored), and slots [0, len) are initialised.
        unsafe { slice::from_raw_parts(self.buffer.as_ptr(), self.len) }
    }

    /// Returns the elements as a mutable slice.
    #[inline]
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.buffer.as_ptr(), self.len) }
    }

    /// Grows the buffer to exactly `new_capacity` slots.
    ///
    /// Does nothing if the capacity is already at least `new_capacity`.
    /// Never changes the length.
    ///
    /// # Panics
    ///
    /// Panics if the buffer size overflows `isize::MAX` bytes.
    #[track_caller]
    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_reserve(new_capacity) {
            panic!("{err}");
        }
    }

    /// Checked form of [`reserve`](Self::reserve).
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::CapacityOverflow`] if the buffer size would
    /// overflow `isize::MAX` bytes. The vector is left unchanged.
    pub fn try_reserve(&mut self, new_capacity: usize) -> VectorResult<()> {
        if new_capacity <= self.capacity {
            return Ok(());
        }
        if Layout::array::<T>(new_capacity).is_err() {
            return Err(VectorError::CapacityOverflow {
                requested: new_capacity,
                element_size: mem::size_of::<T>(),
            });
        }
        self.grow_exact(new_capacity);
        Ok(())
    }

    /// Appends `value` at the end.
    ///
    /// When the buffer is full it grows per the vector's [`VectorConfig`].
    ///
    /// # Panics
    ///
    /// Panics if the grown buffer would overflow `isize::MAX` bytes.
    pub fn push_back(&mut self, value: T) {
        self.ensure_room(self.len + 1);
        // SAFETY: capacity > len after `ensure_room`, and slot `len` is
        // uninitialised, so writing does not leak or overwrite a value.
        unsafe { self.buffer.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Removes and returns the last element, or `None` if empty.
    ///
    /// Capacity is unchanged.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: the vector is not empty.
        Some(unsafe { self.pop_back_unchecked() })
    }

    /// Removes and returns the last element without checking for emptiness.
    ///
    /// # Safety
    ///
    /// The vector must not be empty. Debug builds assert this.
    pub unsafe fn pop_back_unchecked(&mut self) -> T {
        debug_assert!(self.len > 0, "pop_back on an empty vector");
        self.len -= 1;
        // SAFETY: slot `len` was the last initialised slot and is now
        // outside the logical range, so ownership moves to the caller.
        unsafe { self.buffer.as_ptr().add(self.len).read() }
    }

    /// Shortens the vector to `len` elements, dropping the rest.
    ///
    /// Does nothing if `len` is not smaller than the current length.
    /// Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let trimmed = self.len - len;
        // SAFETY: slots [len, self.len) are initialised. The length is
        // lowered first, so a panicking destructor cannot cause a second
        // drop of the same slot.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buffer.as_ptr().add(len), trimmed);
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Drops every element. Capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes to `count` elements, filling new slots with `fill()`.
    ///
    /// Shrinking drops the trimmed elements and keeps the capacity. Growing
    /// past the capacity grows per the vector's [`VectorConfig`]; only the
    /// slots `[len, count)` are initialised.
    ///
    /// # Panics
    ///
    /// Panics if the grown buffer would overflow `isize::MAX` bytes.
    pub fn resize_with<F>(&mut self, count: usize, mut fill: F)
    where
        F: FnMut() -> T,
    {
        if count <= self.len {
            self.truncate(count);
            return;
        }
        self.ensure_room(count);
        while self.len < count {
            // SAFETY: len < count <= capacity, and slot `len` is
            // uninitialised. The length is bumped per element so a
            // panicking `fill` leaves only initialised slots in range.
            unsafe { self.buffer.as_ptr().add(self.len).write(fill()) };
            self.len += 1;
        }
    }

    /// Resizes to `count` elements, filling new slots with `T::default()`.
    ///
    /// For numeric types the new slots are zero.
    ///
    /// # Panics
    ///
    /// Panics if the grown buffer would overflow `isize::MAX` bytes.
    pub fn resize(&mut self, count: usize)
    where
        T: Default,
    {
        self.resize_with(count, T::default);
    }

    /// Resizes to `count` elements, zero-filling the bytes of new slots.
    ///
    /// # Panics
    ///
    /// Panics if the grown buffer would overflow `isize::MAX` bytes.
    pub fn resize_zeroed(&mut self, count: usize)
    where
        T: Zeroable,
    {
        if count <= self.len {
            self.truncate(count);
            return;
        }
        self.ensure_room(count);
        // SAFETY: slots [len, count) lie inside the buffer and are
        // uninitialised; `Zeroable` guarantees all-zero bytes are a valid `T`.
        unsafe { ptr::write_bytes(self.buffer.as_ptr().add(self.len), 0, count - self.len) };
        self.len = count;
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::IndexOutOfBounds`] if `index >= len`.
    pub fn at(&self, index: usize) -> VectorResult<&T> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(VectorError::IndexOutOfBounds { index, len })
    }

    /// Returns the element at `index` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::IndexOutOfBounds`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> VectorResult<&mut T> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(VectorError::IndexOutOfBounds { index, len })
    }

    /// Forward cursor on the first element.
    #[inline]
    #[must_use]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::forward(self.as_slice())
    }

    /// Forward sentinel, one past the last element.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::forward_end(self.as_slice())
    }

    /// Backward cursor on the last element.
    #[inline]
    #[must_use]
    pub fn rbegin(&self) -> Cursor<'_, T> {
        Cursor::backward(self.as_slice())
    }

    /// Backward sentinel, one before the first element.
    #[inline]
    #[must_use]
    pub fn rend(&self) -> Cursor<'_, T> {
        Cursor::backward_end(self.as_slice())
    }

    /// Makes room for `required` elements using the growth policy.
    fn ensure_room(&mut self, required: usize) {
        if required <= self.capacity {
            return;
        }
        let target = self.config.next_capacity(self.capacity, required);
        if self.try_reserve(target).is_err() {
            // The policy overshot what the address space allows.
            self.reserve(required);
        }
    }

    /// Moves the buffer to one of exactly `new_capacity` slots.
    ///
    /// Caller checked that `new_capacity > capacity` and that its layout is
    /// valid.
    fn grow_exact(&mut self, new_capacity: usize) {
        let buffer = if self.capacity == 0 {
            self.alloc.allocate::<T>(new_capacity)
        } else {
            // SAFETY: the buffer came from `self.alloc` with `self.capacity`
            // slots, and len <= capacity < new_capacity.
            unsafe {
                self.alloc
                    .reallocate(self.buffer, self.capacity, self.len, new_capacity)
            }
        };
        tracing::trace!(
            old_capacity = self.capacity,
            new_capacity,
            len = self.len,
            "vector buffer grown"
        );
        self.buffer = buffer;
        self.capacity = new_capacity;
    }
}

impl<T, A: Allocator> Drop for Vector<T, A> {
    fn drop(&mut self) {
        self.clear();
        if self.capacity > 0 {
            // SAFETY: the buffer came from `self.alloc` with `self.capacity`
            // slots and every element has just been dropped.
            unsafe { self.alloc.release(self.buffer, self.capacity) };
        }
    }
}

impl<T, A: Allocator + Default> Default for Vector<T, A> {
    fn default() -> Self {
        Self::with_allocator(A::default())
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_config(self.config, self.alloc.clone());
        copy.reserve(self.len);
        for item in self.as_slice() {
            copy.push_back(item.clone());
        }
        copy
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Deref for Vector<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for Vector<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator> Index<I> for Vector<T, A> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator> IndexMut<I> for Vector<T, A> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T, U, A, B> PartialEq<Vector<U, B>> for Vector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
{
    fn eq(&self, other: &Vector<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for Vector<T, A> {}

impl<T, U, A, const N: usize> PartialEq<[U; N]> for Vector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U, A> PartialEq<&[U]> for Vector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vector = Self::new();
        vector.extend(iter);
        vector
    }
}

impl<T, A: Allocator> Extend<T> for Vector<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.ensure_room(self.len.saturating_add(lower));
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
