// SPDX-License-Identifier: MPL-2.0
//! Per-slide micro-interactions.
//!
//! Each interactive slide gets one typed controller, created when the slide
//! becomes current and dropped when it stops being current.

mod hold;
mod reveal;
mod stepper;
pub mod ticker;

pub use hold::{HoldGesture, HoldStatus, HoldStep, HoldTick, TickSchedule, TickSink};
pub use reveal::{RevealStatus, RevealToggle};
pub use stepper::CyclicStepper;
pub use ticker::Ticker;

/// Controller record owned by the presentation for one slide.
#[derive(Debug)]
pub enum SlideController {
    Hold(HoldGesture),
    Reveal(RevealToggle),
    Stepper(CyclicStepper),
}

/// Read-only snapshot of a slide controller for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionView {
    Hold { progress: u8, status: HoldStatus },
    Reveal { status: RevealStatus },
    Stepper { index: usize, len: usize },
}

impl SlideController {
    pub fn view(&self) -> InteractionView {
        match self {
            Self::Hold(gesture) => InteractionView::Hold {
                progress: gesture.progress(),
                status: gesture.status(),
            },
            Self::Reveal(toggle) => InteractionView::Reveal {
                status: toggle.status(),
            },
            Self::Stepper(stepper) => InteractionView::Stepper {
                index: stepper.index(),
                len: stepper.len(),
            },
        }
    }

    pub fn as_hold_mut(&mut self) -> Option<&mut HoldGesture> {
        match self {
            Self::Hold(gesture) => Some(gesture),
            _ => None,
        }
    }

    pub fn as_reveal_mut(&mut self) -> Option<&mut RevealToggle> {
        match self {
            Self::Reveal(toggle) => Some(toggle),
            _ => None,
        }
    }

    pub fn as_stepper_mut(&mut self) -> Option<&mut CyclicStepper> {
        match self {
            Self::Stepper(stepper) => Some(stepper),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    #[test]
    fn view_reflects_controller_state() {
        let mut controller = SlideController::Stepper(CyclicStepper::new(
            NonZeroUsize::new(4).expect("non-zero"),
        ));
        if let Some(stepper) = controller.as_stepper_mut() {
            stepper.advance();
        }
        assert_eq!(
            controller.view(),
            InteractionView::Stepper { index: 1, len: 4 }
        );
        assert!(controller.as_hold_mut().is_none());
        assert!(controller.as_reveal_mut().is_none());
    }

    #[test]
    fn hold_view_starts_idle() {
        let controller = SlideController::Hold(HoldGesture::manual(HoldStep::default()));
        assert_eq!(
            controller.view(),
            InteractionView::Hold {
                progress: 0,
                status: HoldStatus::Idle
            }
        );
    }
}
