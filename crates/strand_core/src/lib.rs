//! # STRAND Core
//!
//! A growable, contiguous container with a pluggable allocator and
//! direction-aware cursors.
//!
//! ## Architecture
//!
//! ```text
//! Vector<T, A>
//! ├── A: Allocator      (allocate / reallocate / release, byte-level only)
//! ├── VectorConfig      (growth policy, minimum capacity)
//! └── Cursor<'_, T>     (forward / backward traversal, position equality)
//! ```
//!
//! ## Rules
//!
//! 1. **The vector owns its buffer** - nothing else frees or reallocates it
//! 2. **Checked by default** - out-of-range access and popping an empty
//!    vector are reported, never undefined; unchecked paths are `unsafe fn`
//! 3. **Amortized O(1) appends** - capacity grows geometrically by default
//!
//! ## Example
//!
//! ```rust
//! use strand_core::Vector;
//!
//! let mut v = Vector::new();
//! for value in [3, 2, 1] {
//!     v.push_back(value);
//! }
//!
//! let backwards: Vec<i32> = v.rbegin().copied().collect();
//! assert_eq!(backwards, [1, 2, 3]);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod allocator;
pub mod config;
pub mod cursor;
pub mod error;
mod vector;

pub use allocator::{AllocStats, Allocator, Heap, Tracking};
pub use config::{GrowthPolicy, VectorConfig};
pub use cursor::{Cursor, Direction};
pub use error::{VectorError, VectorResult};
pub use vector::Vector;
