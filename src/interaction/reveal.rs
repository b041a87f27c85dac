// SPDX-License-Identifier: MPL-2.0
//! One-shot "reveal hidden content" toggle.

use crate::celebration::Celebration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealStatus {
    #[default]
    Closed,
    /// Terminal.
    Open,
}

/// Flips closed to open exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealToggle {
    status: RevealStatus,
}

impl RevealToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RevealStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == RevealStatus::Open
    }

    /// Opens the toggle, returning the celebration on the closed→open edge only.
    pub fn activate(&mut self) -> Option<Celebration> {
        if self.is_open() {
            return None;
        }
        self.status = RevealStatus::Open;
        log::info!("hidden content revealed");
        Some(Celebration::reveal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let toggle = RevealToggle::new();
        assert_eq!(toggle.status(), RevealStatus::Closed);
        assert!(!toggle.is_open());
    }

    #[test]
    fn second_activation_is_silent() {
        let mut toggle = RevealToggle::new();
        assert_eq!(toggle.activate(), Some(Celebration::reveal()));
        assert!(toggle.is_open());

        assert_eq!(toggle.activate(), None);
        assert_eq!(toggle.activate(), None);
        assert!(toggle.is_open());
    }
}
