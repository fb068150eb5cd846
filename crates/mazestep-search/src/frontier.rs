//! Frontier containers.
//!
//! [`Frontier`] is a FIFO queue or a LIFO stack depending on its [`Order`].
//! [`CostQueue`] is a min-heap keyed by `(cost, insertion_order)`: lower
//! costs are popped first and equal costs come out FIFO.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::config::Order;

/// A queue or a stack, selected by [`Order`].
#[derive(Debug, Clone)]
pub struct Frontier<T> {
    items: VecDeque<T>,
    order: Order,
}

impl<T> Frontier<T> {
    pub fn new(order: Order) -> Self {
        Self {
            items: VecDeque::new(),
            order,
        }
    }

    /// Add an item at the back.
    #[inline]
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Remove the front item (FIFO) or the back item (LIFO).
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        match self.order {
            Order::Fifo => self.items.pop_front(),
            Order::Lifo => self.items.pop_back(),
        }
    }

    /// The item the next [`pop`](Self::pop) would return.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        match self.order {
            Order::Fifo => self.items.front(),
            Order::Lifo => self.items.back(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order (front to back).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

// ---------------------------------------------------------------------------
// CostQueue
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Entry<T> {
    item: T,
    cost: f64,
    /// Monotonically increasing, breaks cost ties in insertion order.
    seq: u64,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Wrapped in Reverse inside the heap: smaller cost, then smaller seq.
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue over `f64` costs.
///
/// Ties are broken by insertion order, so the pop sequence is fully
/// deterministic.
#[derive(Debug)]
pub struct CostQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    seq: u64,
}

impl<T> CostQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Push an item at the given cost.
    pub fn push(&mut self, item: T, cost: f64) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { item, cost, seq }));
    }

    /// Pop the cheapest item together with its cost.
    pub fn pop(&mut self) -> Option<(T, f64)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.item, entry.cost))
    }

    /// The item the next [`pop`](Self::pop) would return.
    pub fn peek(&self) -> Option<(&T, f64)> {
        self.heap
            .peek()
            .map(|Reverse(entry)| (&entry.item, entry.cost))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Items in arbitrary (heap) order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.heap.iter().map(|Reverse(entry)| &entry.item)
    }
}

impl<T> Default for CostQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
