//! Bounded buffers backing the feed.

use std::collections::VecDeque;

/// Fixed-capacity FIFO window.
///
/// Pushing past capacity evicts the oldest item. Iteration is oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingWindow<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> SlidingWindow<T> {
    /// Creates an empty window holding at most `capacity` items.
    ///
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `item`, evicting the oldest item when full.
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    /// Appends every item in order.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.push(item);
        }
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Most recent item.
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the window is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Items, oldest first.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}

/// Fixed-capacity list with the newest item first.
///
/// Pushing past capacity drops the oldest item.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRing<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> NotificationRing<T> {
    /// Creates an empty ring holding at most `capacity` items.
    ///
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Inserts `item` at the front, dropping the oldest when full.
    pub fn push(&mut self, item: T) {
        self.items.push_front(item);
        self.items.truncate(self.capacity);
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the ring is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items, newest first.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, T> {
        self.items.iter()
    }
}
