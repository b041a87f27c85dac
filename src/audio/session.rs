// SPDX-License-Identifier: MPL-2.0
//! Audio session: transport state for the presentation's single resource.
//!
//! The session exclusively owns the [`AudioResource`] and mirrors its state:
//! - `playing` only becomes true once a play request succeeds
//! - switching tracks pauses, rewinds and reloads before anything else
//! - play results and resource events from a superseded load are dropped
//!
//! Play requests are returned to the caller as [`PlayRequest`]s to be awaited
//! wherever the host runs async work; the outcome is fed back through
//! [`AudioSession::settle`].

use super::catalog::{Track, TrackCatalog};
use super::resource::{
    AudioResource, LoadId, PlayFuture, PlayOrigin, ResourceEvent, ResourceEventKind,
};
use crate::error::PlaybackError;
use std::fmt;

/// Identity of one play request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayTicket {
    pub track: usize,
    pub load: LoadId,
    serial: u64,
}

/// An issued play request whose outcome is still pending.
pub struct PlayRequest {
    pub ticket: PlayTicket,
    pub origin: PlayOrigin,
    future: PlayFuture,
}

impl PlayRequest {
    /// Waits for the platform's answer.
    pub async fn settle(self) -> (PlayTicket, Result<(), PlaybackError>) {
        let outcome = self.future.await;
        (self.ticket, outcome)
    }
}

impl fmt::Debug for PlayRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayRequest")
            .field("ticket", &self.ticket)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

/// Read model of the transport for renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSnapshot {
    pub track_index: usize,
    pub title: String,
    pub artist: String,
    pub playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub pending_autoplay: bool,
}

/// Owner of the single audio resource and its transport state.
pub struct AudioSession<R> {
    resource: R,
    catalog: TrackCatalog,
    track_index: usize,
    playing: bool,
    current_time: f64,
    /// Zero while unknown.
    duration: f64,
    pending_autoplay: bool,
    load: LoadId,
    next_serial: u64,
    in_flight: Option<PlayTicket>,
}

impl<R: AudioResource> AudioSession<R> {
    /// Takes ownership of `resource` and loads the first catalog track.
    pub fn new(mut resource: R, catalog: TrackCatalog) -> Self {
        let load = LoadId::first();
        resource.load(catalog.first(), load);
        let duration = sanitize_duration(resource.duration());
        Self {
            resource,
            catalog,
            track_index: 0,
            playing: false,
            current_time: 0.0,
            duration,
            pending_autoplay: true,
            load,
            next_serial: 0,
            in_flight: None,
        }
    }

    pub fn track_index(&self) -> usize {
        self.track_index
    }

    pub fn track(&self) -> Option<&Track> {
        self.catalog.get(self.track_index)
    }

    pub fn catalog(&self) -> &TrackCatalog {
        &self.catalog
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// True until the deferred autoplay attempt has been made.
    pub fn pending_autoplay(&self) -> bool {
        self.pending_autoplay
    }

    /// True while a play request has been issued but not settled.
    pub fn has_request_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn snapshot(&self) -> AudioSnapshot {
        let (title, artist) = self
            .track()
            .map(|t| (t.title.clone(), t.artist.clone()))
            .unwrap_or_default();
        AudioSnapshot {
            track_index: self.track_index,
            title,
            artist,
            playing: self.playing,
            current_time: self.current_time,
            duration: self.duration,
            pending_autoplay: self.pending_autoplay,
        }
    }

    /// Flips the transport.
    ///
    /// Pausing is immediate. Starting returns a request to await; `playing`
    /// only changes once its outcome is settled.
    pub fn toggle(&mut self) -> Option<PlayRequest> {
        if self.playing {
            self.resource.pause();
            self.playing = false;
            self.in_flight = None;
            log::debug!("audio paused at {:.2}s", self.current_time);
            return None;
        }
        Some(self.request_play(PlayOrigin::UserGesture))
    }

    /// Makes the one-time deferred start attempt.
    ///
    /// Returns `None` when the attempt was already made, or when playback is
    /// running or being requested already.
    pub fn autoplay(&mut self) -> Option<PlayRequest> {
        if !self.pending_autoplay {
            return None;
        }
        self.pending_autoplay = false;
        if self.playing || self.in_flight.is_some() {
            return None;
        }
        log::debug!("attempting deferred autoplay");
        Some(self.request_play(PlayOrigin::Autoplay))
    }

    /// Switches to catalog entry `index`, paused at position zero.
    ///
    /// No-op for the current track or an index outside the catalog.
    /// Playback is not resumed.
    pub fn switch_track(&mut self, index: usize) -> bool {
        if index == self.track_index {
            return false;
        }
        let Some(track) = self.catalog.get(index) else {
            log::debug!("ignoring switch to missing track {}", index);
            return false;
        };

        self.resource.pause();
        self.current_time = 0.0;
        self.playing = false;
        self.in_flight = None;

        self.track_index = index;
        self.load = self.load.next();
        self.resource.load(track, self.load);
        self.duration = sanitize_duration(self.resource.duration());
        log::info!("switched to track {} \"{}\"", index, track.title);
        true
    }

    /// Seeks to `fraction` of the track length.
    ///
    /// Ignored while the duration is unknown or for non-finite input;
    /// finite input is clamped to `[0, 1]`.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> bool {
        if !fraction.is_finite() || self.duration <= 0.0 {
            return false;
        }
        let target = fraction.clamp(0.0, 1.0) * self.duration;
        self.resource.set_current_time(target);
        self.current_time = target;
        true
    }

    /// Applies the outcome of a play request.
    ///
    /// Outcomes for anything but the latest request on the current load are
    /// discarded. Rejections are logged and swallowed.
    pub fn settle(&mut self, ticket: PlayTicket, outcome: Result<(), PlaybackError>) {
        let current = self.in_flight == Some(ticket)
            && ticket.track == self.track_index
            && ticket.load == self.load;

        if !current {
            log::debug!("discarding stale play outcome {:?}: {:?}", ticket, outcome);
            if outcome.is_ok() && !self.playing && self.in_flight.is_none() {
                // keep the resource in line with the paused transport
                self.resource.pause();
            }
            return;
        }

        self.in_flight = None;
        match outcome {
            Ok(()) => {
                self.playing = true;
                log::info!("audio playing track {}", self.track_index);
            }
            Err(err) => {
                self.playing = false;
                log::warn!("audio stays paused: {}", err);
            }
        }
    }

    /// Applies an event pushed by the resource.
    pub fn handle_event(&mut self, event: ResourceEvent) {
        if event.load != self.load {
            log::debug!("discarding event from stale load: {:?}", event);
            return;
        }
        match event.kind {
            ResourceEventKind::TimeUpdate(secs) => {
                if secs.is_finite() {
                    self.current_time = self.clamp_to_duration(secs);
                }
            }
            ResourceEventKind::MetadataLoaded { duration } => {
                self.duration = sanitize_duration(Some(duration));
                self.current_time = self.clamp_to_duration(self.current_time);
            }
            ResourceEventKind::Ended => {
                // no auto-advance to the next track
                self.playing = false;
                self.in_flight = None;
                log::debug!("track {} ended", self.track_index);
            }
        }
    }

    fn request_play(&mut self, origin: PlayOrigin) -> PlayRequest {
        self.next_serial += 1;
        let ticket = PlayTicket {
            track: self.track_index,
            load: self.load,
            serial: self.next_serial,
        };
        self.in_flight = Some(ticket);
        PlayRequest {
            ticket,
            origin,
            future: self.resource.play(origin),
        }
    }

    fn clamp_to_duration(&self, secs: f64) -> f64 {
        if self.duration > 0.0 {
            secs.clamp(0.0, self.duration)
        } else {
            secs.max(0.0)
        }
    }
}

impl<R> fmt::Debug for AudioSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioSession")
            .field("track_index", &self.track_index)
            .field("playing", &self.playing)
            .field("current_time", &self.current_time)
            .field("duration", &self.duration)
            .field("pending_autoplay", &self.pending_autoplay)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

fn sanitize_duration(duration: Option<f64>) -> f64 {
    duration.filter(|d| d.is_finite() && *d > 0.0).unwrap_or(0.0)
}
