use core::iter::FusedIterator;

use crate::array::OArray;

/// Iterator over the elements of an `OArray` in index order
///
/// This iterator implements `Clone`.
#[derive(Debug)]
pub struct Iter<'a, T> {
    slots: &'a [Option<T>],
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(slots: &'a [Option<T>]) -> Self {
        Self { slots }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { slots: self.slots }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let (first, rest) = self.slots.split_first()?;
        self.slots = rest;
        first.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.slots.len(), Some(self.slots.len()))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (last, rest) = self.slots.split_last()?;
        self.slots = rest;
        last.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over the elements of an `OArray`
///
/// Each step is a front removal, so the remaining elements stay in a valid
/// `OArray` until the iterator is dropped.
#[derive(Debug)]
pub struct IntoIter<T> {
    array: OArray<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(array: OArray<T>) -> Self {
        Self { array }
    }
}

impl<T: Clone> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.array.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.array.len(), Some(self.array.len()))
    }
}

impl<T: Clone> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.array.pop_last()
    }
}

impl<T: Clone> ExactSizeIterator for IntoIter<T> {}

/// Iterator over key-value pairs of an `OrderedMap` in insertion order
///
/// This iterator implements `Clone`.
#[derive(Debug)]
pub struct Pairs<'a, K, V> {
    keys: Iter<'a, K>,
    values: Iter<'a, V>,
}

impl<'a, K, V> Pairs<'a, K, V> {
    pub(crate) fn new(keys: Iter<'a, K>, values: Iter<'a, V>) -> Self {
        Self { keys, values }
    }
}

impl<K, V> Clone for Pairs<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            values: self.values.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Pairs<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        let value = self.values.next()?;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Pairs<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.keys.next_back()?;
        let value = self.values.next_back()?;
        Some((key, value))
    }
}

impl<K, V> ExactSizeIterator for Pairs<'_, K, V> {}

impl<K, V> FusedIterator for Pairs<'_, K, V> {}
