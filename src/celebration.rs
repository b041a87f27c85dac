// SPDX-License-Identifier: MPL-2.0
//! Celebration effects fired on completion events.
//!
//! Controllers describe a burst as a [`Celebration`] value; the host's
//! [`CelebrationEmitter`] turns it into visuals. Emitting is fire-and-forget:
//! implementations must return promptly and never report failure.

use crate::config::{
    DEFAULT_BURST_SPREAD_DEG, HOLD_BURST_PARTICLES, MAX_BURST_PARTICLES, REVEAL_BURST_ORIGIN_Y,
    REVEAL_BURST_PARTICLES,
};
use tokio::sync::mpsc;

/// Visual flavour of a burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationKind {
    Confetti,
    Hearts,
}

/// Particle count of a burst, clamped to `1..=MAX_BURST_PARTICLES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intensity(u32);

impl Intensity {
    #[must_use]
    pub fn new(particles: u32) -> Self {
        Self(particles.clamp(1, MAX_BURST_PARTICLES))
    }

    #[must_use]
    pub fn particles(self) -> u32 {
        self.0
    }
}

/// Where the burst should appear, as fractions of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    pub x: f32,
    pub y: f32,
}

impl Origin {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(0.0, 1.0),
            y: y.clamp(0.0, 1.0),
        }
    }

    #[must_use]
    pub fn center() -> Self {
        Self::new(0.5, 0.5)
    }
}

/// A single feedback burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celebration {
    pub kind: CelebrationKind,
    pub intensity: Intensity,
    pub origin: Origin,
    pub spread_deg: f32,
}

impl Celebration {
    /// Burst fired when hidden content is revealed.
    #[must_use]
    pub fn reveal() -> Self {
        Self {
            kind: CelebrationKind::Confetti,
            intensity: Intensity::new(REVEAL_BURST_PARTICLES),
            origin: Origin::new(0.5, REVEAL_BURST_ORIGIN_Y),
            spread_deg: DEFAULT_BURST_SPREAD_DEG,
        }
    }

    /// Burst fired when a hold gesture completes.
    #[must_use]
    pub fn hold_complete() -> Self {
        Self {
            kind: CelebrationKind::Hearts,
            intensity: Intensity::new(HOLD_BURST_PARTICLES),
            origin: Origin::center(),
            spread_deg: DEFAULT_BURST_SPREAD_DEG,
        }
    }
}

/// Receiver of celebration bursts.
pub trait CelebrationEmitter {
    fn emit(&self, celebration: &Celebration);
}

/// Emitter that only records bursts in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEmitter;

impl CelebrationEmitter for LogEmitter {
    fn emit(&self, celebration: &Celebration) {
        log::info!(
            "celebration: {:?} x{} at ({:.2}, {:.2})",
            celebration.kind,
            celebration.intensity.particles(),
            celebration.origin.x,
            celebration.origin.y
        );
    }
}

/// Emitter forwarding bursts to a renderer over an unbounded channel.
///
/// Sending never blocks; bursts are dropped once the renderer has gone.
#[derive(Debug, Clone)]
pub struct ChannelEmitter {
    tx: mpsc::UnboundedSender<Celebration>,
}

impl ChannelEmitter {
    /// Creates the emitter and the receiving end for the renderer.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Celebration>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl CelebrationEmitter for ChannelEmitter {
    fn emit(&self, celebration: &Celebration) {
        if self.tx.send(*celebration).is_err() {
            log::debug!("celebration dropped: renderer is gone");
        }
    }
}
