//! Per-thread scratch for decoding.
//!
//! Decoding nests (a member may be a record), so each level takes its own
//! values from the pools; the pools only bound how many idle ones are kept.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use fixedbitset::FixedBitSet;
use vc_utils::pool::{LocalPool, Pooled, Recycle};

use crate::info::ArgSlot;

/// A "seen" bit per member or parameter.
#[derive(Debug, Default)]
pub(crate) struct SeenSet(FixedBitSet);

impl SeenSet {
    /// Clears all bits and grows to at least `len`.
    pub(crate) fn reset(&mut self, len: usize) {
        self.0.clear();
        self.0.grow(len);
    }
}

impl Deref for SeenSet {
    type Target = FixedBitSet;

    #[inline]
    fn deref(&self) -> &FixedBitSet {
        &self.0
    }
}

impl DerefMut for SeenSet {
    #[inline]
    fn deref_mut(&mut self) -> &mut FixedBitSet {
        &mut self.0
    }
}

impl Recycle for SeenSet {
    #[inline]
    fn recycle(&mut self) {
        self.0.clear();
    }
}

thread_local! {
    static KEYS: LocalPool<String> = const { LocalPool::new(8) };
    static SEEN: LocalPool<SeenSet> = const { LocalPool::new(16) };
    static SLOTS: LocalPool<Vec<ArgSlot>> = const { LocalPool::new(8) };
}

/// A buffer for case-folded keys, wiped on release.
#[inline]
pub(crate) fn key_buffer() -> Pooled<String> {
    Pooled::acquire(&KEYS)
}

/// A cleared bit set of at least `len` bits.
pub(crate) fn seen_set(len: usize) -> Pooled<SeenSet> {
    let mut seen = Pooled::acquire(&SEEN);
    seen.reset(len);
    seen
}

/// `len` empty constructor argument slots.
///
/// Staged values are dropped on release.
pub(crate) fn arg_slots(len: usize) -> Pooled<Vec<ArgSlot>> {
    let mut slots = Pooled::acquire(&SLOTS);
    slots.resize_with(len, ArgSlot::default);
    slots
}

#[cfg(test)]
mod tests {
    use super::{arg_slots, key_buffer, seen_set};

    #[test]
    fn scratch_comes_back_clean() {
        {
            let mut key = key_buffer();
            key.push_str("password");
            let mut seen = seen_set(4);
            seen.insert(3);
            let mut slots = arg_slots(2);
            slots[0].fill(Box::new(1_u8));
        }
        assert!(key_buffer().is_empty());
        let seen = seen_set(2);
        assert!(seen.len() >= 2);
        assert_eq!(seen.count_ones(..), 0);
        let slots = arg_slots(3);
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(|s| !s.is_filled()));
    }
}
