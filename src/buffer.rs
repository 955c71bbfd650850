use alloc::rc::Rc;
use alloc::vec::Vec;
use core::iter;
use core::ops::Range;

use crate::iter::Iter;

pub(crate) const DEFAULT_CAPACITY: usize = 10;

// Growth factor 1.6, kept as an integer ratio so the result is floor(count * 1.6).
const GROWTH_NUMERATOR: usize = 8;
const GROWTH_DENOMINATOR: usize = 5;

/// Capacity to reallocate to once `count` live elements fill the region.
pub(crate) fn grown_capacity(count: usize) -> usize {
    (count.saturating_mul(GROWTH_NUMERATOR) / GROWTH_DENOMINATOR).max(1) + 1
}

fn vacant_slots<T>(capacity: usize) -> Vec<Option<T>> {
    iter::repeat_with(|| None).take(capacity).collect()
}

/// Contiguous slot storage with offset bookkeeping.
///
/// Layout: `[front slack][live elements][back slack]`. Exactly the slots in
/// `offset..offset + count` hold elements, the rest are vacant.
///
/// The slot region sits behind an `Rc` so that slices can alias it without
/// copying. Every mutation goes through `slots_mut`, which detaches a shared
/// region first, so aliases never observe each other's writes.
pub(crate) struct Buffer<T> {
    slots: Rc<Vec<Option<T>>>,
    offset: usize,
    count: usize,
    minimum_capacity: usize,
}

impl<T> Buffer<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Rc::new(vacant_slots(capacity)),
            offset: 0,
            count: 0,
            minimum_capacity: capacity,
        }
    }

    /// Takes ownership of `elements` with capacity equal to their count.
    pub(crate) fn from_vec(elements: Vec<T>) -> Self {
        let count = elements.len();
        Self {
            slots: Rc::new(elements.into_iter().map(Some).collect()),
            offset: 0,
            count,
            minimum_capacity: count,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.count
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn is_aliased(&self) -> bool {
        Rc::strong_count(&self.slots) > 1
    }

    fn live_range(&self) -> Range<usize> {
        self.offset..self.offset + self.count
    }

    fn live(&self) -> &[Option<T>] {
        &self.slots[self.live_range()]
    }

    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.live().get(index).and_then(Option::as_ref)
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.live())
    }

    /// Shares the slot region over `range`, relative to the live elements.
    pub(crate) fn slice(&self, range: Range<usize>) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
            offset: self.offset + range.start,
            count: range.len(),
            minimum_capacity: range.len(),
        }
    }
}

impl<T: Clone> Buffer<T> {
    pub(crate) fn repeated(count: usize, value: &T) -> Self {
        Self::from_vec(iter::repeat(value).take(count).cloned().collect())
    }

    /// Gives mutable access to the slot region, detaching it from any alias.
    ///
    /// A detached copy keeps the capacity and layout; only the live elements
    /// are cloned.
    #[allow(clippy::expect_used)]
    fn slots_mut(&mut self) -> &mut Vec<Option<T>> {
        if Rc::get_mut(&mut self.slots).is_none() {
            let range = self.live_range();
            let mut detached = vacant_slots(self.capacity());
            detached[range.clone()].clone_from_slice(&self.slots[range]);
            self.slots = Rc::new(detached);
        }
        Rc::get_mut(&mut self.slots).expect("Slot region is unique after detaching")
    }

    /// Moves the live elements out, or clones them when the region is shared.
    fn take_live(&mut self) -> Vec<T> {
        let range = self.live_range();
        if let Some(slots) = Rc::get_mut(&mut self.slots) {
            return slots[range].iter_mut().filter_map(Option::take).collect();
        }
        self.slots[range].iter().flatten().cloned().collect()
    }

    /// Moves the live elements into a fresh region of `capacity` slots,
    /// replacing `replaced` with `inserted` on the way. Resets `offset` to 0.
    fn rebuild<I>(&mut self, capacity: usize, replaced: Range<usize>, inserted: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut prefix = self.take_live();
        let suffix = prefix.split_off(replaced.end);
        let removed = prefix.split_off(replaced.start);

        let mut slots = Vec::with_capacity(capacity);
        slots.extend(prefix.into_iter().chain(inserted).chain(suffix).map(Some));
        let count = slots.len();
        slots.resize_with(capacity.max(count), || None);

        self.slots = Rc::new(slots);
        self.offset = 0;
        self.count = count;
        removed
    }

    /// Capacity for a reallocation that must hold `required` elements.
    ///
    /// Never below the minimum capacity.
    fn grown_for(&self, required: usize) -> usize {
        grown_capacity(self.count)
            .max(required)
            .max(self.minimum_capacity)
    }

    fn reallocate(&mut self, capacity: usize) {
        let end = self.count;
        self.rebuild(capacity, end..end, iter::empty());
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.count {
            return None;
        }
        let position = self.offset + index;
        self.slots_mut()[position].as_mut()
    }

    pub(crate) fn live_mut(&mut self, range: Range<usize>) -> &mut [Option<T>] {
        let start = self.offset + range.start;
        let end = self.offset + range.end;
        &mut self.slots_mut()[start..end]
    }

    pub(crate) fn push_back(&mut self, value: T) {
        if self.offset + self.count == self.capacity() {
            self.reallocate(self.grown_for(self.count + 1));
        }
        let end = self.offset + self.count;
        self.slots_mut()[end] = Some(value);
        self.count += 1;
    }

    pub(crate) fn extend_back(&mut self, elements: Vec<T>) {
        let required = self.offset + self.count + elements.len();
        if required > self.capacity() {
            self.reallocate(self.grown_for(self.count + elements.len()));
        }
        let end = self.offset + self.count;
        let added = elements.len();
        for (slot, element) in self.slots_mut()[end..].iter_mut().zip(elements) {
            *slot = Some(element);
        }
        self.count += added;
    }

    /// Inserts `elements` before the live element at `index`.
    ///
    /// Insertion at the front reuses front slack when there is enough of it.
    pub(crate) fn insert_many(&mut self, index: usize, elements: Vec<T>) {
        let added = elements.len();
        if index == 0 && self.offset >= added {
            let start = self.offset - added;
            for (slot, element) in self.slots_mut()[start..].iter_mut().zip(elements) {
                *slot = Some(element);
            }
            self.offset = start;
            self.count += added;
            return;
        }

        let required = self.count + added;
        let capacity = if required <= self.capacity() {
            self.capacity()
        } else {
            self.grown_for(required)
        };
        self.rebuild(capacity, index..index, elements);
    }

    pub(crate) fn pop_front(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let front = self.offset;
        let value = self.slots_mut()[front].take();
        self.offset += 1;
        self.count -= 1;
        value
    }

    pub(crate) fn pop_back(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }
        let back = self.offset + self.count - 1;
        let value = self.slots_mut()[back].take();
        self.count -= 1;
        value
    }

    /// Removes the live element at `index`, compacting the suffix in place.
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.count {
            return None;
        }
        if index == 0 {
            return self.pop_front();
        }
        if index == self.count - 1 {
            return self.pop_back();
        }

        let range = self.live_range();
        let start = self.offset + index;
        let slots = &mut self.slots_mut()[start..range.end];
        let value = slots[0].take();
        slots.rotate_left(1);
        self.count -= 1;
        value
    }

    /// Replaces the live elements in `range` with `elements`.
    ///
    /// Equal lengths overwrite in place. Otherwise the region is rebuilt at
    /// exactly the resulting size, floored at the minimum capacity.
    pub(crate) fn replace_range(&mut self, range: Range<usize>, elements: Vec<T>) {
        if elements.len() == range.len() {
            let start = self.offset + range.start;
            for (slot, element) in self.slots_mut()[start..].iter_mut().zip(elements) {
                *slot = Some(element);
            }
            return;
        }
        let capacity = (self.count - range.len() + elements.len()).max(self.minimum_capacity);
        self.rebuild(capacity, range, elements);
    }

    pub(crate) fn clear(&mut self, keep_capacity: bool) {
        if !keep_capacity {
            self.slots = Rc::new(vacant_slots(self.minimum_capacity));
        } else if let Some(slots) = Rc::get_mut(&mut self.slots) {
            let range = self.offset..self.offset + self.count;
            slots[range].iter_mut().for_each(|slot| *slot = None);
        } else {
            self.slots = Rc::new(vacant_slots(self.capacity()));
        }
        self.offset = 0;
        self.count = 0;
    }

    pub(crate) fn reserve(&mut self, minimum_capacity: usize) {
        self.minimum_capacity = minimum_capacity;
        if self.capacity() < minimum_capacity {
            self.reallocate(minimum_capacity);
        }
    }
}

impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
            offset: self.offset,
            count: self.count,
            minimum_capacity: self.minimum_capacity,
        }
    }
}
