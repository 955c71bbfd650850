#![no_std]

//! `oarray`: a growable offset-buffer array and an insertion-ordered map.
//!
//! [`OArray`] stores its elements in one contiguous slot region together with
//! an offset, a count and a capacity. [`OrderedMap`] keeps hash codes, keys
//! and values in three position-aligned `OArray`s, so it grows and compacts
//! the same way.
//!
//! This crate is `no_std` compatible and only needs `alloc`.
//!
//! Buffer layout: `[front slack][live elements][back slack]`
//!
//! # Performance Characteristics
//!
//! ## Time Complexity
//! - `append()`: amortized O(1); a full buffer grows to `max(1, floor(len * 1.6)) + 1`
//! - `get()`, `set()`, indexing: O(1)
//! - `remove_first()`, `remove_last()`: O(1) - offset increment / count decrement
//! - `insert(_, 0)`: O(1) when there is front slack left by earlier front removals
//! - `insert()`, `remove_at()`, `replace_range()`: O(n)
//! - `slice()`, `clone()`: O(1) - the slot region is shared, not copied
//! - `OrderedMap` lookup and insert: O(1) average
//! - `OrderedMap` removal: O(1) for the first and last pair, O(n) otherwise
//!
//! ## Growth and front slack
//!
//! ```
//! # use oarray::OArray;
//! let mut array = OArray::from([1, 2, 3]);
//! assert_eq!(array.capacity(), 3);
//!
//! array.append(4);
//! assert_eq!(array, [1, 2, 3, 4]);
//! assert_eq!(array.capacity(), 5);
//!
//! // Front removals leave slack that front insertions reuse
//! array.remove_first();
//! array.remove_first();
//! array.insert(99, 0);
//! assert_eq!(array, [99, 3, 4]);
//! assert_eq!(array.capacity(), 5);
//! ```
//!
//! # Slices
//!
//! [`OArray::slice`] returns an `OArray` that shares the parent's storage.
//! The first mutation on either side copies the live elements into a private
//! region, so a slice never sees the parent's later changes and the parent
//! never sees the slice's:
//!
//! ```
//! # use oarray::OArray;
//! let mut parent = OArray::from([10, 20, 30, 40]);
//! let mut slice = parent.slice(1..3);
//! assert!(slice.is_aliased());
//!
//! slice[0] = 21;
//! parent.append(50);
//!
//! assert_eq!(slice, [21, 30]);
//! assert_eq!(parent, [10, 20, 30, 40, 50]);
//! ```
//!
//! [`OArray::view_mut`] returns a [`SliceView`] whose writes land in the
//! parent:
//!
//! ```
//! # use oarray::OArray;
//! let mut parent = OArray::from([10, 20, 30, 40]);
//! {
//!     let mut view = parent.view_mut(1..3);
//!     view[0] = 21;
//!     assert_eq!(view.to_string(), "[21, 30]");
//! }
//! assert_eq!(parent[1], 21);
//! ```
//!
//! # Ordered Map
//!
//! Iteration follows first-insertion order. Updating a value keeps the key
//! where it was:
//!
//! ```
//! # use oarray::OrderedMap;
//! let mut map = OrderedMap::new();
//! map.insert(1, "a");
//! map.insert(2, "b");
//! assert_eq!(map.insert(1, "c"), Some("a"));
//!
//! let pairs: Vec<_> = map.iter().collect();
//! assert_eq!(pairs, vec![(&1, &"c"), (&2, &"b")]);
//! assert_eq!(map.to_string(), "[1: c, 2: b]");
//!
//! // Setting `None` deletes the key
//! map.set(1, None);
//! assert_eq!(map.get(&1), None);
//! ```
//!
//! # Errors
//!
//! Index, range and empty-collection violations are contract violations: the
//! plain methods panic with a [`ContainerError`] message. Every such method
//! has a `try_*` form that returns the error instead and leaves the container
//! unchanged:
//!
//! ```
//! # use oarray::{ContainerError, OArray};
//! let mut array: OArray<i32> = OArray::new();
//! assert_eq!(array.try_remove_first(), Err(ContainerError::EmptyCollection));
//! assert_eq!(
//!     array.try_insert(1, 3),
//!     Err(ContainerError::IndexOutOfRange { index: 3, count: 0 })
//! );
//! ```

extern crate alloc;

mod array;
mod buffer;
mod error;
mod iter;
mod map;

// Re-export public types and traits
pub use array::{OArray, SliceView};
pub use error::ContainerError;
pub use iter::{IntoIter, Iter, Pairs};
pub use map::OrderedMap;
