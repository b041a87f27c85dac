// SPDX-License-Identifier: MPL-2.0
//! Companion audio for the presentation.
//!
//! One [`AudioSession`] owns the only [`AudioResource`] for the lifetime of
//! the presentation. Tracks come from a static [`TrackCatalog`]; playback is
//! never chained from one track to the next.

mod catalog;
mod resource;
mod session;
mod simulated;

pub use catalog::{Track, TrackCatalog};
pub use resource::{
    AudioResource, EventSink, LoadId, PlayFuture, PlayOrigin, ResourceEvent, ResourceEventKind,
};
pub use session::{AudioSession, AudioSnapshot, PlayRequest, PlayTicket};
pub use simulated::{AutoplayPolicy, SimulatedResource};

/// Formats a position in seconds as `m:ss` for transport displays.
///
/// # Examples
///
/// ```
/// use storydeck::audio::format_clock;
///
/// assert_eq!(format_clock(0.0), "0:00");
/// assert_eq!(format_clock(125.7), "2:05");
/// ```
pub fn format_clock(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
