// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022-2023 SUSE LLC
//
// Author: Roy Hopkins <rhopkins@suse.de>

/// Fixed-size bitmap handing out the lowest free index.
///
/// `WORDS` 64-bit words back the map, for a capacity of `WORDS * 64`
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdBitmap<const WORDS: usize> {
    bits: [u64; WORDS],
}

impl<const WORDS: usize> Default for IdBitmap<WORDS> {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl<const WORDS: usize> IdBitmap<WORDS> {
    pub const CAPACITY: usize = WORDS * u64::BITS as usize;

    pub const fn new_empty() -> Self {
        Self { bits: [0; WORDS] }
    }

    /// Marks the lowest clear index below `limit` as used and returns it.
    pub fn alloc(&mut self, limit: usize) -> Option<usize> {
        let idx = self.next_free(0)?;
        if idx >= limit {
            return None;
        }
        self.set(idx, true);
        Some(idx)
    }

    pub fn free(&mut self, idx: usize) {
        assert!(self.get(idx), "freeing unused id {idx}");
        self.set(idx, false);
    }

    pub fn set(&mut self, idx: usize, value: bool) {
        assert!(idx < Self::CAPACITY);
        let mask = 1u64 << (idx % 64);
        if value {
            self.bits[idx / 64] |= mask;
        } else {
            self.bits[idx / 64] &= !mask;
        }
    }

    pub fn get(&self, idx: usize) -> bool {
        assert!(idx < Self::CAPACITY);
        (self.bits[idx / 64] & (1u64 << (idx % 64))) != 0
    }

    /// Returns the first clear index at or above `start`.
    pub fn next_free(&self, start: usize) -> Option<usize> {
        if start >= Self::CAPACITY {
            return None;
        }
        let mut offset = start % 64;
        for (index, word) in self.bits.iter().enumerate().skip(start / 64) {
            // Treat everything below the start offset as used.
            let mask: u64 = (1 << offset) - 1;
            let idx = (word | mask).trailing_ones() as usize;
            if idx < 64 {
                return Some(index * 64 + idx);
            }
            // Only the first loop iteration uses a non-zero offset
            offset = 0;
        }
        None
    }

    pub fn used(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn empty(&self) -> bool {
        self.bits.iter().all(|w| *w == 0)
    }
}
