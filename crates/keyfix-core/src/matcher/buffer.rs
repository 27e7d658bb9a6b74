use std::collections::VecDeque;

use crate::keycode::BOUNDARY_SYMBOL;

/// Ring buffer of the most recently typed trie symbols.
///
/// Holds at most `capacity` symbols; pushing onto a full buffer drops the
/// oldest. No typo is longer than the capacity, so a dropped symbol can
/// never be part of a match.
#[derive(Debug, Clone)]
pub struct TypedBuffer {
    symbols: VecDeque<u8>,
    capacity: usize,
}

impl TypedBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            symbols: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, symbol: u8) {
        if self.symbols.len() == self.capacity {
            self.symbols.pop_front();
        }
        self.symbols.push_back(symbol);
    }

    pub fn pop(&mut self) -> Option<u8> {
        self.symbols.pop_back()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    /// Forget everything, remembering only that a word starts here.
    pub fn reset_to_boundary(&mut self) {
        self.symbols.clear();
        self.symbols.push_back(BOUNDARY_SYMBOL);
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the buffer holds no letters (empty, or a lone boundary).
    pub fn has_no_letters(&self) -> bool {
        self.symbols.iter().all(|&s| s == BOUNDARY_SYMBOL)
    }

    pub fn iter_recent_first(&self) -> impl Iterator<Item = u8> + '_ {
        self.symbols.iter().rev().copied()
    }
}
