//! Bounded per-slot history of GPU VRAM samples.
//!
//! One FIFO ring per display slot, fixed at compile time to
//! [`config::GPU_SLOTS`] rings of at most [`config::VRAM_HISTORY_LEN`]
//! entries. Insertion order is chronological order and is used directly
//! as the x axis of the VRAM line graph.

use std::collections::VecDeque;

use crate::config::{GPU_SLOTS, VRAM_HISTORY_LEN};

/// Rolling VRAM-percent history for the fixed GPU display slots.
#[derive(Debug, Clone)]
pub struct VramHistory {
    rings: [VecDeque<f32>; GPU_SLOTS],
}

impl VramHistory {
    pub fn new() -> Self {
        Self {
            rings: std::array::from_fn(|_| VecDeque::with_capacity(VRAM_HISTORY_LEN)),
        }
    }

    /// Appends a sample to a slot's ring, evicting the oldest entry once
    /// the ring is full.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= GPU_SLOTS`.
    pub fn push(&mut self, slot: usize, value: f32) {
        let ring = &mut self.rings[slot];
        if ring.len() == VRAM_HISTORY_LEN {
            ring.pop_front();
        }
        ring.push_back(value);
    }

    /// Returns the slot's samples in chronological order.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= GPU_SLOTS`.
    pub fn snapshot(&self, slot: usize) -> Vec<f32> {
        self.rings[slot].iter().copied().collect()
    }

    /// Number of samples currently held for a slot.
    pub fn len(&self, slot: usize) -> usize {
        self.rings[slot].len()
    }

    pub fn is_empty(&self, slot: usize) -> bool {
        self.rings[slot].is_empty()
    }
}

impl Default for VramHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_ten_samples_in_push_order() {
        let mut history = VramHistory::new();
        for n in 0..25 {
            history.push(0, n as f32);
            let expected_len = (n + 1).min(VRAM_HISTORY_LEN);
            assert_eq!(history.len(0), expected_len);
        }
        let expected: Vec<f32> = (15..25).map(|n| n as f32).collect();
        assert_eq!(history.snapshot(0), expected);
    }

    #[test]
    fn shorter_sequences_are_returned_whole() {
        let mut history = VramHistory::new();
        history.push(2, 10.0);
        history.push(2, 20.0);
        history.push(2, 30.0);
        assert_eq!(history.snapshot(2), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn slots_are_independent() {
        let mut history = VramHistory::new();
        for slot in 0..GPU_SLOTS {
            history.push(slot, slot as f32);
        }
        for slot in 0..GPU_SLOTS {
            assert_eq!(history.snapshot(slot), vec![slot as f32]);
        }
        assert!(!history.is_empty(1));
    }

    #[test]
    fn empty_slot_snapshot_is_empty() {
        let history = VramHistory::new();
        assert!(history.snapshot(3).is_empty());
        assert_eq!(history.len(3), 0);
    }
}
