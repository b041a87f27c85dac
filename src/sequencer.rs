// SPDX-License-Identifier: MPL-2.0
//! Slide sequencing for the linear presentation.
//!
//! The [`SlideSequencer`] owns the current position in a fixed-length
//! sequence together with the direction of the last move. Navigation is
//! bounds-safe: out-of-range targets are ignored without touching state.

/// Transition hint derived from the sign of an index delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Moving towards the end of the sequence.
    #[default]
    Forward,
    /// Moving towards the start of the sequence.
    Backward,
}

impl Direction {
    /// Returns true if this is a forward move.
    #[must_use]
    pub fn is_forward(self) -> bool {
        matches!(self, Self::Forward)
    }

    /// Returns the signed unit step for this direction.
    #[must_use]
    pub fn signum(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// A completed index change, handed to the renderer to animate.
///
/// By the time a `Transition` exists the sequencer index has already been
/// updated; rendering never observes a half-applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
}

/// One progress marker as shown in the presentation's position indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub index: usize,
    /// The slide has been reached (it is at or before the current one).
    pub visited: bool,
    pub current: bool,
}

/// Position and direction within a fixed-length slide sequence.
///
/// Invariant: `index < total` at all times, and `total >= 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSequencer {
    index: usize,
    direction: Direction,
    total: usize,
}

impl SlideSequencer {
    /// Creates a sequencer positioned on the first of `total` slides.
    ///
    /// Returns `None` for an empty sequence.
    pub fn new(total: usize) -> Option<Self> {
        (total > 0).then_some(Self {
            index: 0,
            direction: Direction::Forward,
            total,
        })
    }

    /// Moves to `target`.
    ///
    /// Targets outside `[0, total)` and the current index are silent no-ops
    /// returning `None`. Distant jumps only report the sign of the move.
    pub fn go_to(&mut self, target: isize) -> Option<Transition> {
        let target = usize::try_from(target).ok().filter(|t| *t < self.total)?;
        if target == self.index {
            return None;
        }

        let from = self.index;
        let direction = if target > from {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.index = target;
        self.direction = direction;

        Some(Transition {
            from,
            to: target,
            direction,
        })
    }

    /// Moves one slide forward. No-op on the last slide.
    pub fn next(&mut self) -> Option<Transition> {
        self.go_to(self.signed_index() + 1)
    }

    /// Moves one slide backward. No-op on the first slide.
    pub fn prev(&mut self) -> Option<Transition> {
        self.go_to(self.signed_index() - 1)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Checks if a next slide exists.
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.total
    }

    /// Checks if a previous slide exists.
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Returns the progress markers for every slide in order.
    pub fn markers(&self) -> Vec<Marker> {
        (0..self.total)
            .map(|index| Marker {
                index,
                visited: index <= self.index,
                current: index == self.index,
            })
            .collect()
    }

    fn signed_index(&self) -> isize {
        // total fits in isize: it is the length of an allocated deck
        self.index as isize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequencer(total: usize) -> SlideSequencer {
        SlideSequencer::new(total).expect("non-empty sequence")
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert!(SlideSequencer::new(0).is_none());
    }

    #[test]
    fn starts_at_first_slide_moving_forward() {
        let seq = sequencer(8);
        assert_eq!(seq.index(), 0);
        assert_eq!(seq.direction(), Direction::Forward);
        assert_eq!(seq.total(), 8);
    }

    #[test]
    fn out_of_range_targets_leave_index_unchanged() {
        let mut seq = sequencer(8);
        seq.go_to(3);
        for target in [-100, -1, 8, 9, 1_000, isize::MAX, isize::MIN] {
            assert_eq!(seq.go_to(target), None);
            assert_eq!(seq.index(), 3);
            assert_eq!(seq.direction(), Direction::Forward);
        }
    }

    #[test]
    fn next_three_times_then_prev() {
        let mut seq = sequencer(8);
        for expected in 1..=3 {
            let transition = seq.next().expect("room to advance");
            assert_eq!(transition.to, expected);
            assert_eq!(seq.index(), expected);
            assert_eq!(seq.direction(), Direction::Forward);
        }

        let back = seq.prev().expect("room to go back");
        assert_eq!(back.from, 3);
        assert_eq!(seq.index(), 2);
        assert_eq!(seq.direction(), Direction::Backward);
    }

    #[test]
    fn distant_jump_reports_sign_only() {
        let mut seq = sequencer(8);
        let forward = seq.go_to(7).expect("valid target");
        assert_eq!(forward.direction, Direction::Forward);
        assert_eq!(forward.direction.signum(), 1);

        let backward = seq.go_to(1).expect("valid target");
        assert_eq!(backward.direction, Direction::Backward);
        assert_eq!(backward.direction.signum(), -1);
    }

    #[test]
    fn going_to_current_slide_is_noop() {
        let mut seq = sequencer(4);
        seq.go_to(2);
        seq.prev();
        assert_eq!(seq.go_to(1), None);
        assert_eq!(seq.direction(), Direction::Backward);
    }

    #[test]
    fn ends_are_bounded() {
        let mut seq = sequencer(2);
        assert!(!seq.has_previous());
        assert_eq!(seq.prev(), None);
        seq.next();
        assert!(!seq.has_next());
        assert_eq!(seq.next(), None);
        assert_eq!(seq.index(), 1);
    }

    #[test]
    fn single_slide_never_moves() {
        let mut seq = sequencer(1);
        assert_eq!(seq.next(), None);
        assert_eq!(seq.prev(), None);
        assert_eq!(seq.index(), 0);
    }

    #[test]
    fn markers_track_visited_and_current() {
        let mut seq = sequencer(4);
        seq.go_to(2);
        let markers = seq.markers();
        assert_eq!(markers.len(), 4);
        assert!(markers[0].visited && !markers[0].current);
        assert!(markers[2].visited && markers[2].current);
        assert!(!markers[3].visited);
    }
}
