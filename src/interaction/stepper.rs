// SPDX-License-Identifier: MPL-2.0
//! Wraparound index for tap-to-cycle content.

use std::num::NonZeroUsize;

/// Index into a fixed set of `len` items.
///
/// Invariant: `index < len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclicStepper {
    index: usize,
    len: NonZeroUsize,
}

impl CyclicStepper {
    pub fn new(len: NonZeroUsize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len.get()
    }

    /// Jumps straight to item `index`. Out-of-range values are ignored.
    ///
    /// Returns whether the index is valid.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.len() {
            return false;
        }
        self.index = index;
        true
    }

    /// Steps to the next item, wrapping from the last back to the first.
    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.len();
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stepper(len: usize) -> CyclicStepper {
        CyclicStepper::new(NonZeroUsize::new(len).expect("non-zero"))
    }

    #[test]
    fn advance_wraps_forward() {
        let mut s = stepper(4);
        let visited: Vec<usize> = (0..6).map(|_| s.advance()).collect();
        assert_eq!(visited, vec![1, 2, 3, 0, 1, 2]);
    }

    #[test]
    fn select_is_bounds_checked() {
        let mut s = stepper(4);
        assert!(s.select(3));
        assert_eq!(s.index(), 3);

        assert!(!s.select(4));
        assert!(!s.select(usize::MAX));
        assert_eq!(s.index(), 3);
    }

    #[test]
    fn advance_after_select_continues_from_selection() {
        let mut s = stepper(4);
        s.select(2);
        assert_eq!(s.advance(), 3);
        assert_eq!(s.advance(), 0);
    }

    #[test]
    fn single_item_stays_put() {
        let mut s = stepper(1);
        assert_eq!(s.advance(), 0);
        assert_eq!(s.len(), 1);
    }
}
