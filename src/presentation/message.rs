// SPDX-License-Identifier: MPL-2.0
//! Messages posted back to the presentation by background tasks.

use super::deck::SlideKey;
use crate::audio::{PlayTicket, ResourceEvent};
use crate::error::PlaybackError;
use tokio::sync::mpsc;

/// Work delivered to `Presentation::update`. Timer tasks, play futures and
/// the audio resource never touch state directly; they post one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Scheduled tick for the hold gesture on `slide`.
    HoldTick { slide: SlideKey, generation: u64 },
    /// A play request settled.
    PlaySettled {
        ticket: PlayTicket,
        outcome: Result<(), PlaybackError>,
    },
    /// Event pushed by the audio resource.
    Resource(ResourceEvent),
}

/// Cloneable sending half of the presentation inbox.
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<Message>,
}

impl Outbox {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Posts a message. Returns `false` once the presentation is gone.
    pub fn post(&self, message: Message) -> bool {
        self.tx.send(message).is_ok()
    }
}
