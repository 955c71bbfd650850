use alloc::vec::Vec;
use core::fmt;
use core::ops::{Bound, Index, IndexMut, Range, RangeBounds};

use crate::buffer::{Buffer, DEFAULT_CAPACITY};
use crate::error::{or_panic, ContainerError};
use crate::iter::{IntoIter, Iter};

/// Resolves `range` against `count` live elements.
pub(crate) fn resolve_range<R>(range: &R, count: usize) -> Result<Range<usize>, ContainerError>
where
    R: RangeBounds<usize>,
{
    let start = match range.start_bound() {
        Bound::Included(&start) => Some(start),
        Bound::Excluded(&start) => start.checked_add(1),
        Bound::Unbounded => Some(0),
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.checked_add(1),
        Bound::Excluded(&end) => Some(end),
        Bound::Unbounded => Some(count),
    };
    match (start, end) {
        (Some(start), Some(end)) if start <= end && end <= count => Ok(start..end),
        (start, end) => Err(ContainerError::InvalidRange {
            start: start.unwrap_or(usize::MAX),
            end: end.unwrap_or(usize::MAX),
            count,
        }),
    }
}

/// A growable array over a single offset buffer.
///
/// Appends grow the buffer by a factor of 1.6. Front removals leave slack in
/// front of the first element, which later front insertions reuse without
/// reallocating.
///
/// Cloning and slicing are zero-copy: the result shares the slot region with
/// its source. The first mutation on either side copies the live elements
/// into a private region, so aliases never see each other's changes. Use
/// [`OArray::view_mut`] for a window whose writes land in this array.
pub struct OArray<T> {
    buffer: Buffer<T>,
}

impl<T> OArray<T> {
    /// Creates an empty `OArray` with the default capacity (10).
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty `OArray` with room for `capacity` elements.
    ///
    /// `capacity` is also the floor restored by [`OArray::remove_all`].
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Buffer::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Total slots of the underlying buffer, including front and back slack.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Number of vacant slots in front of the first element.
    #[must_use]
    pub fn front_slack(&self) -> usize {
        self.buffer.offset()
    }

    /// Returns `true` while the slot region is shared with a clone or slice.
    #[must_use]
    pub fn is_aliased(&self) -> bool {
        self.buffer.is_aliased()
    }

    /// Gets the element at `index`, or `None` if it is out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.buffer.get(index)
    }

    /// Tries to get the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::IndexOutOfRange` if `index >= len()`.
    pub fn try_get(&self, index: usize) -> Result<&T, ContainerError> {
        self.buffer.get(index).ok_or(ContainerError::IndexOutOfRange {
            index,
            count: self.len(),
        })
    }

    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.buffer.get(0)
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|index| self.buffer.get(index))
    }

    /// Returns an iterator over the elements in index order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        self.buffer.iter()
    }

    /// Returns the first element matching `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|element| predicate(element))
    }

    /// Returns the index of the first element matching `predicate`.
    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(predicate)
    }

    /// Returns an `OArray` over `range` that shares this array's storage.
    ///
    /// No element is copied. The slice keeps the parent's capacity, and its
    /// front slack is the parent's slack plus `range.start`.
    ///
    /// # Panics
    ///
    /// Panics if the range is malformed or extends past `len()`.
    #[must_use]
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> Self {
        or_panic(self.try_slice(range))
    }

    /// Tries to create a shared slice over `range`.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::InvalidRange` if the range is malformed or
    /// extends past `len()`.
    pub fn try_slice<R: RangeBounds<usize>>(&self, range: R) -> Result<Self, ContainerError> {
        let range = resolve_range(&range, self.len())?;
        Ok(Self {
            buffer: self.buffer.slice(range),
        })
    }
}

impl<T: Clone> OArray<T> {
    /// Creates an `OArray` of `count` clones of `value`.
    #[must_use]
    pub fn repeated(count: usize, value: T) -> Self {
        Self {
            buffer: Buffer::repeated(count, &value),
        }
    }

    /// Gets a mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.buffer.get_mut(index)
    }

    /// Appends `element` to the back.
    ///
    /// When the buffer is full it is reallocated to
    /// `max(1, floor(len * 1.6)) + 1` slots.
    pub fn append(&mut self, element: T) {
        self.buffer.push_back(element);
    }

    /// Appends every element of `elements` to the back.
    pub fn append_many<I: IntoIterator<Item = T>>(&mut self, elements: I) {
        self.buffer.extend_back(elements.into_iter().collect());
    }

    /// Writes `element` at `index`, appending when `index == len()`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn set(&mut self, index: usize, element: T) {
        or_panic(self.try_set(index, element));
    }

    /// Tries to write `element` at `index`, appending when `index == len()`.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::IndexOutOfRange` if `index > len()`.
    pub fn try_set(&mut self, index: usize, element: T) -> Result<(), ContainerError> {
        let count = self.len();
        if index == count {
            self.append(element);
            return Ok(());
        }
        let slot = self
            .buffer
            .get_mut(index)
            .ok_or(ContainerError::IndexOutOfRange { index, count })?;
        *slot = element;
        Ok(())
    }

    /// Inserts `element` before the element at `index`.
    ///
    /// Inserting at index 0 reuses front slack when there is any.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, element: T, index: usize) {
        or_panic(self.try_insert(element, index));
    }

    /// Tries to insert `element` before the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::IndexOutOfRange` if `index > len()`.
    pub fn try_insert(&mut self, element: T, index: usize) -> Result<(), ContainerError> {
        self.try_insert_many(core::iter::once(element), index)
    }

    /// Splices `elements` in before the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_many<I: IntoIterator<Item = T>>(&mut self, elements: I, index: usize) {
        or_panic(self.try_insert_many(elements, index));
    }

    /// Tries to splice `elements` in before the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::IndexOutOfRange` if `index > len()`.
    pub fn try_insert_many<I>(&mut self, elements: I, index: usize) -> Result<(), ContainerError>
    where
        I: IntoIterator<Item = T>,
    {
        let count = self.len();
        if index > count {
            return Err(ContainerError::IndexOutOfRange { index, count });
        }
        self.buffer.insert_many(index, elements.into_iter().collect());
        Ok(())
    }

    /// Removes and returns the first element in O(1).
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn remove_first(&mut self) -> T {
        or_panic(self.try_remove_first())
    }

    /// Tries to remove and return the first element.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::EmptyCollection` if the array is empty.
    pub fn try_remove_first(&mut self) -> Result<T, ContainerError> {
        self.buffer.pop_front().ok_or(ContainerError::EmptyCollection)
    }

    /// Removes and returns the last element in O(1).
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn remove_last(&mut self) -> T {
        or_panic(self.try_remove_last())
    }

    /// Tries to remove and return the last element.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::EmptyCollection` if the array is empty.
    pub fn try_remove_last(&mut self) -> Result<T, ContainerError> {
        self.buffer.pop_back().ok_or(ContainerError::EmptyCollection)
    }

    /// Removes the first element, or returns `None` if the array is empty.
    pub fn pop_first(&mut self) -> Option<T> {
        self.buffer.pop_front()
    }

    /// Removes the last element, or returns `None` if the array is empty.
    pub fn pop_last(&mut self) -> Option<T> {
        self.buffer.pop_back()
    }

    /// Removes and returns the element at `index`, shifting later elements down.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty or `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> T {
        or_panic(self.try_remove_at(index))
    }

    /// Tries to remove and return the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::EmptyCollection` if the array is empty, or
    /// `ContainerError::IndexOutOfRange` if `index >= len()`.
    pub fn try_remove_at(&mut self, index: usize) -> Result<T, ContainerError> {
        let count = self.len();
        if count == 0 {
            return Err(ContainerError::EmptyCollection);
        }
        self.buffer
            .remove_at(index)
            .ok_or(ContainerError::IndexOutOfRange { index, count })
    }

    /// Replaces the elements in `range` with `elements`.
    ///
    /// When the lengths match the elements are overwritten in place and the
    /// capacity is unchanged. Otherwise the buffer is reallocated to exactly
    /// the resulting length.
    ///
    /// # Panics
    ///
    /// Panics if the range is malformed or extends past `len()`.
    pub fn replace_range<R, I>(&mut self, range: R, elements: I)
    where
        R: RangeBounds<usize>,
        I: IntoIterator<Item = T>,
    {
        or_panic(self.try_replace_range(range, elements));
    }

    /// Tries to replace the elements in `range` with `elements`.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::InvalidRange` if the range is malformed or
    /// extends past `len()`.
    pub fn try_replace_range<R, I>(&mut self, range: R, elements: I) -> Result<(), ContainerError>
    where
        R: RangeBounds<usize>,
        I: IntoIterator<Item = T>,
    {
        let range = resolve_range(&range, self.len())?;
        self.buffer
            .replace_range(range, elements.into_iter().collect());
        Ok(())
    }

    /// Removes the elements in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is malformed or extends past `len()`.
    pub fn remove_range<R: RangeBounds<usize>>(&mut self, range: R) {
        or_panic(self.try_replace_range(range, core::iter::empty()));
    }

    /// Removes all elements.
    ///
    /// With `keep_capacity == false` the buffer shrinks back to its minimum
    /// capacity. The front slack is reset to zero either way.
    pub fn remove_all(&mut self, keep_capacity: bool) {
        self.buffer.clear(keep_capacity);
    }

    /// Sets the minimum capacity and grows the buffer to it if needed.
    pub fn reserve_capacity(&mut self, minimum_capacity: usize) {
        self.buffer.reserve(minimum_capacity);
    }

    /// Returns a window over `range` whose writes land in this array.
    ///
    /// # Panics
    ///
    /// Panics if the range is malformed or extends past `len()`.
    pub fn view_mut<R: RangeBounds<usize>>(&mut self, range: R) -> SliceView<'_, T> {
        or_panic(self.try_view_mut(range))
    }

    /// Tries to create a write-through window over `range`.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::InvalidRange` if the range is malformed or
    /// extends past `len()`.
    pub fn try_view_mut<R>(&mut self, range: R) -> Result<SliceView<'_, T>, ContainerError>
    where
        R: RangeBounds<usize>,
    {
        let range = resolve_range(&range, self.len())?;
        Ok(SliceView {
            slots: self.buffer.live_mut(range),
        })
    }

    /// Copies the elements into a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for OArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for OArray<T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
        }
    }
}

impl<T> From<Vec<T>> for OArray<T> {
    fn from(elements: Vec<T>) -> Self {
        Self {
            buffer: Buffer::from_vec(elements),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for OArray<T> {
    fn from(elements: [T; N]) -> Self {
        Self::from(Vec::from(elements))
    }
}

impl<T: Clone> FromIterator<T> for OArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T: Clone> Extend<T> for OArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.append(element);
        }
    }
}

impl<T> Index<usize> for OArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        or_panic(self.try_get(index))
    }
}

impl<T: Clone> IndexMut<usize> for OArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let count = self.len();
        or_panic(
            self.buffer
                .get_mut(index)
                .ok_or(ContainerError::IndexOutOfRange { index, count }),
        )
    }
}

impl<'a, T> IntoIterator for &'a OArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone> IntoIterator for OArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<T: PartialEq<U>, U> PartialEq<OArray<U>> for OArray<T> {
    fn eq(&self, other: &OArray<U>) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for OArray<T> {}

impl<T: PartialEq<U>, U> PartialEq<[U]> for OArray<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for OArray<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        *self == other[..]
    }
}

impl<T: PartialEq<U>, U> PartialEq<Vec<U>> for OArray<T> {
    fn eq(&self, other: &Vec<U>) -> bool {
        *self == other[..]
    }
}

fn write_list<'a, T, I>(f: &mut fmt::Formatter<'_>, elements: I) -> fmt::Result
where
    T: fmt::Display + 'a,
    I: IntoIterator<Item = &'a T>,
{
    f.write_str("[")?;
    for (i, element) in elements.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{element}")?;
    }
    f.write_str("]")
}

/// Renders as `[e1, e2, ...]`.
impl<T: fmt::Display> fmt::Display for OArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self)
    }
}

impl<T: fmt::Debug> fmt::Debug for OArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OArray")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("front_slack", &self.front_slack())
            .field("elements", &DebugElements(self.iter()))
            .finish()
    }
}

struct DebugElements<'a, T>(Iter<'a, T>);

impl<T: fmt::Debug> fmt::Debug for DebugElements<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}

/// A mutable window over part of an `OArray`.
///
/// Writes through the view are writes to the parent's elements. The parent
/// stays mutably borrowed while the view is alive, so it cannot reallocate
/// underneath it.
pub struct SliceView<'a, T> {
    slots: &'a mut [Option<T>],
}

impl<T> SliceView<'_, T> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Tries to overwrite the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ContainerError::IndexOutOfRange` if `index >= len()`.
    pub fn try_set(&mut self, index: usize, element: T) -> Result<(), ContainerError> {
        let count = self.len();
        let slot = self
            .get_mut(index)
            .ok_or(ContainerError::IndexOutOfRange { index, count })?;
        *slot = element;
        Ok(())
    }

    /// Overwrites the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, element: T) {
        or_panic(self.try_set(index, element));
    }

    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&*self.slots)
    }
}

impl<T> Index<usize> for SliceView<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        let count = self.len();
        or_panic(
            self.get(index)
                .ok_or(ContainerError::IndexOutOfRange { index, count }),
        )
    }
}

impl<T> IndexMut<usize> for SliceView<'_, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let count = self.len();
        or_panic(
            self.get_mut(index)
                .ok_or(ContainerError::IndexOutOfRange { index, count }),
        )
    }
}

impl<T: fmt::Display> fmt::Display for SliceView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for SliceView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
