// SPDX-License-Identifier: MPL-2.0
//! Abstract playable audio resource.
//!
//! The audio session drives exactly one [`AudioResource`]. Transport
//! commands are synchronous except `play`, which returns a future that may
//! be rejected by the platform. Progress flows back as [`ResourceEvent`]s
//! pushed through the [`EventSink`] given at subscription time.

use super::catalog::Track;
use crate::error::PlaybackError;
use futures_util::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// Pending result of a play request.
pub type PlayFuture = BoxFuture<'static, Result<(), PlaybackError>>;

/// Identifies one load of a track into the resource.
///
/// Each load gets a fresh ID so events and play results belonging to an
/// earlier load can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadId(u64);

impl LoadId {
    pub fn first() -> Self {
        Self(1)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Why playback is being requested.
///
/// Platforms typically allow `UserGesture` plays and may refuse `Autoplay`
/// ones until the user has interacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOrigin {
    UserGesture,
    Autoplay,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResourceEventKind {
    /// Playback position changed (seconds).
    TimeUpdate(f64),
    /// Track metadata became available.
    MetadataLoaded { duration: f64 },
    /// Playback reached the end of a non-looping track.
    Ended,
}

/// Event emitted by the resource, tagged with the load it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceEvent {
    pub load: LoadId,
    pub kind: ResourceEventKind,
}

impl ResourceEvent {
    pub fn new(load: LoadId, kind: ResourceEventKind) -> Self {
        Self { load, kind }
    }
}

/// Destination for resource events.
#[derive(Clone)]
pub struct EventSink(Arc<dyn Fn(ResourceEvent) -> bool + Send + Sync>);

impl EventSink {
    /// Wraps a delivery callback returning `false` once the receiver is gone.
    pub fn new<F>(deliver: F) -> Self
    where
        F: Fn(ResourceEvent) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(deliver))
    }

    /// Delivers one event. Returns `false` if nobody is listening anymore.
    pub fn emit(&self, event: ResourceEvent) -> bool {
        (self.0)(event)
    }
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSink").finish_non_exhaustive()
    }
}

/// A single playable audio resource.
pub trait AudioResource {
    /// Registers where time-update, metadata-loaded and ended events go.
    fn subscribe(&mut self, sink: EventSink);

    /// Replaces the current source with `track`, paused at position zero.
    fn load(&mut self, track: &Track, load: LoadId);

    /// Requests playback. The future settles once the platform decides.
    fn play(&mut self, origin: PlayOrigin) -> PlayFuture;

    fn pause(&mut self);

    fn current_time(&self) -> f64;

    fn set_current_time(&mut self, secs: f64);

    /// Track length in seconds, once known.
    fn duration(&self) -> Option<f64>;
}
