//! Indexed binary min-heap.
//!
//! Ordered by priority, then by insertion order, so equal priorities pop
//! first-in first-out. Every pushed item gets a [`Handle`] that stays valid
//! until the item is popped; [`PriorityQueue::update`] repairs the heap in
//! `O(log n)` after a priority change.

/// Stable reference to an item in a [`PriorityQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

#[derive(Debug, Clone)]
struct Entry<P, T> {
    priority: P,
    sequence: u64,
    handle: usize,
    item: T,
}

impl<P: Ord, T> Entry<P, T> {
    fn precedes(&self, other: &Self) -> bool {
        (&self.priority, self.sequence) < (&other.priority, other.sequence)
    }
}

/// Min-priority queue with decrease-key.
#[derive(Debug, Clone)]
pub struct PriorityQueue<P, T> {
    heap: Vec<Entry<P, T>>,
    /// Heap position per handle; `None` once popped.
    positions: Vec<Option<usize>>,
    next_sequence: u64,
}

impl<P: Ord, T> Default for PriorityQueue<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Ord, T> PriorityQueue<P, T> {
    /// Create an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            heap: Vec::new(),
            positions: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Number of queued items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Insert an item.
    pub fn push(&mut self, priority: P, item: T) -> Handle {
        let handle = self.positions.len();
        let position = self.heap.len();
        self.heap.push(Entry {
            priority,
            sequence: self.next_sequence,
            handle,
            item,
        });
        self.next_sequence += 1;
        self.positions.push(Some(position));
        self.sift_up(position);
        Handle(handle)
    }

    /// Remove the item with the lowest priority.
    pub fn pop(&mut self) -> Option<(P, T)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.positions[entry.handle] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.priority, entry.item))
    }

    /// Lowest priority and its item, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<(&P, &T)> {
        self.heap.first().map(|entry| (&entry.priority, &entry.item))
    }

    /// Returns true if the handle's item is still queued.
    #[must_use]
    pub fn contains(&self, handle: Handle) -> bool {
        self.position(handle).is_some()
    }

    /// Current priority of a queued item.
    #[must_use]
    pub fn priority(&self, handle: Handle) -> Option<&P> {
        self.position(handle).map(|pos| &self.heap[pos].priority)
    }

    /// Change a queued item's priority and restore heap order.
    ///
    /// The item keeps its original insertion order for tie-breaking.
    /// Returns false if the item was already popped.
    pub fn update(&mut self, handle: Handle, priority: P) -> bool {
        let Some(position) = self.position(handle) else {
            return false;
        };
        self.heap[position].priority = priority;
        self.sift_up(position);
        if let Some(position) = self.position(handle) {
            self.sift_down(position);
        }
        true
    }

    fn position(&self, handle: Handle) -> Option<usize> {
        self.positions.get(handle.0).copied().flatten()
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.positions[self.heap[a].handle] = Some(a);
        self.positions[self.heap[b].handle] = Some(b);
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !self.heap[position].precedes(&self.heap[parent]) {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * position + 1;
            let right = left + 1;
            let mut smallest = position;
            if left < len && self.heap[left].precedes(&self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.heap[right].precedes(&self.heap[smallest]) {
                smallest = right;
            }
            if smallest == position {
                break;
            }
            self.swap(position, smallest);
            position = smallest;
        }
    }
}
