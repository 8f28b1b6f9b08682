//! A comparator-driven binary heap with in-place priority updates.
//!
//! `std::collections::BinaryHeap` cannot re-key an element that is already
//! queued, which A* needs when a cheaper path to a frontier cell turns up.
//! [`Heap`] stores its elements in a level-ordered `Vec` (children of `i` at
//! `2i + 1` and `2i + 2`) and exposes [`Heap::update_priority`] for that
//! case.

use std::cmp::Ordering;
use std::fmt;

/// Comparator type used by [`Heap::min`] and [`Heap::max`].
pub type OrderFn<T> = fn(&T, &T) -> Ordering;

fn reverse_order<T: Ord>(a: &T, b: &T) -> Ordering {
    b.cmp(a)
}

/// Binary heap ordered by a caller-supplied comparator.
///
/// The element for which the comparator answers [`Ordering::Less`] against
/// every other element is the root, so a natural `cmp` yields a min-heap.
#[derive(Clone)]
pub struct Heap<T, C = OrderFn<T>> {
    items: Vec<T>,
    cmp: C,
}

impl<T: Ord> Heap<T> {
    /// Min-heap over the natural ordering of `T`.
    pub fn min() -> Self {
        Self::with_comparator(<T as Ord>::cmp)
    }

    /// Max-heap over the natural ordering of `T`.
    pub fn max() -> Self {
        Self::with_comparator(reverse_order::<T>)
    }
}

impl<T, C> Heap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Empty heap ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            items: Vec::new(),
            cmp,
        }
    }

    /// Number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The highest-priority element, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Drop every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Elements in level order (not priority order).
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Insert `item`. O(log n).
    pub fn offer(&mut self, item: T) {
        self.items.push(item);
        self.bubble_up(self.items.len() - 1);
    }

    /// Remove and return the highest-priority element, or `None` when empty.
    pub fn poll(&mut self) -> Option<T> {
        let last = self.items.pop()?;
        if self.items.is_empty() {
            return Some(last);
        }
        let root = std::mem::replace(&mut self.items[0], last);
        self.bubble_down(0);
        Some(root)
    }

    /// Re-key a queued element.
    ///
    /// The first stored element equal to `item` is replaced by `item` and
    /// moved to its new place. Equality identifies the element, the
    /// comparator orders it, so `T`'s `PartialEq` should ignore the key.
    /// Returns `false`, leaving the heap untouched, when nothing matches.
    /// The lookup is a linear scan.
    pub fn update_priority(&mut self, item: T) -> bool
    where
        T: PartialEq,
    {
        let Some(idx) = self.items.iter().position(|x| *x == item) else {
            return false;
        };
        self.items[idx] = item;
        if idx > 0 && self.precedes(idx, parent(idx)) {
            self.bubble_up(idx);
        } else {
            self.bubble_down(idx);
        }
        true
    }

    /// Whether the element at `a` should sit above the element at `b`.
    #[inline]
    fn precedes(&self, a: usize, b: usize) -> bool {
        (self.cmp)(&self.items[a], &self.items[b]) == Ordering::Less
    }

    fn bubble_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let p = parent(idx);
            if !self.precedes(idx, p) {
                break;
            }
            self.items.swap(idx, p);
            idx = p;
        }
    }

    fn bubble_down(&mut self, mut idx: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                return;
            }
            let right = left + 1;
            let child = if right < len && self.precedes(right, left) {
                right
            } else {
                left
            };
            if !self.precedes(child, idx) {
                return;
            }
            self.items.swap(idx, child);
            idx = child;
        }
    }

    /// Whether every parent is ordered before or equal to its children.
    #[cfg(test)]
    fn is_valid(&self) -> bool {
        (1..self.items.len()).all(|i| !self.precedes(i, parent(i)))
    }
}

#[inline]
fn parent(idx: usize) -> usize {
    (idx - 1) / 2
}

impl<T: fmt::Debug, C> fmt::Debug for Heap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap").field("items", &self.items).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for Heap<T, C> {
    /// Sideways tree: right subtree above its parent, left below, one tab
    /// of indent per level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn walk<T: fmt::Display>(
            items: &[T],
            idx: usize,
            depth: usize,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            if idx >= items.len() {
                return Ok(());
            }
            walk(items, 2 * idx + 2, depth + 1, f)?;
            writeln!(f, "{}{}", "\t".repeat(depth), items[idx])?;
            walk(items, 2 * idx + 1, depth + 1, f)
        }
        walk(&self.items, 0, 0, f)
    }
}
