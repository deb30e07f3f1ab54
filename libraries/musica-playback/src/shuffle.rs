//! Shuffle projection over queue indices
//!
//! The queue itself is never reordered. Shuffle is a permutation of queue
//! indices plus a cursor into that permutation, so turning shuffle off
//! restores the original order losslessly.

use rand::seq::SliceRandom;
use rand::Rng;

/// Permutation of `[0, len)` with the anchor track at position 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleProjection {
    /// Queue indices in play order
    order: Vec<usize>,

    /// Position within `order`
    cursor: usize,
}

impl ShuffleProjection {
    /// Build a projection for a queue of `len` tracks anchored at `current`
    ///
    /// Algorithm:
    /// 1. Remove `current` from the candidate indices
    /// 2. Fisher-Yates shuffle the remainder
    /// 3. Prepend `current`
    ///
    /// The track already playing keeps playing, and every other track appears
    /// exactly once before the order wraps.
    pub fn generate<R: Rng + ?Sized>(len: usize, current: usize, rng: &mut R) -> Self {
        if len == 0 {
            return Self {
                order: Vec::new(),
                cursor: 0,
            };
        }

        let anchor = current.min(len - 1);
        let mut order: Vec<usize> = (0..len).filter(|&i| i != anchor).collect();
        order.shuffle(rng);
        order.insert(0, anchor);

        Self { order, cursor: 0 }
    }

    /// Queue indices in play order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Current position within the permutation
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor (ignored when out of range)
    pub fn set_cursor(&mut self, position: usize) {
        if position < self.order.len() {
            self.cursor = position;
        }
    }

    /// Queue index at a permutation position
    pub fn index_at(&self, position: usize) -> Option<usize> {
        self.order.get(position).copied()
    }

    /// Queue index under the cursor
    pub fn current_index(&self) -> Option<usize> {
        self.index_at(self.cursor)
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the projection is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
