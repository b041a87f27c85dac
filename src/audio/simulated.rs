// SPDX-License-Identifier: MPL-2.0
//! In-process stand-in for a platform audio element.
//!
//! [`SimulatedResource`] keeps a virtual playhead advanced by a background
//! [`Ticker`], reports it through the subscribed [`EventSink`], and applies
//! an [`AutoplayPolicy`] to play requests the way browsers do: autoplay is
//! refused until a user gesture has started playback once.

use super::catalog::Track;
use super::resource::{
    AudioResource, EventSink, LoadId, PlayFuture, PlayOrigin, ResourceEvent, ResourceEventKind,
};
use crate::config::{
    DEFAULT_SIMULATED_PLAY_LATENCY_MS, DEFAULT_SIMULATED_TRACK_SECS,
    SIMULATED_PLAYHEAD_INTERVAL_MS,
};
use crate::error::PlaybackError;
use crate::interaction::Ticker;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Whether the platform lets playback start without a user gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutoplayPolicy {
    Allowed,
    #[default]
    RequiresGesture,
}

#[derive(Debug)]
struct Playhead {
    load: LoadId,
    position: f64,
    duration: f64,
    playing: bool,
    looping: bool,
    /// A gesture-initiated play has succeeded at least once.
    unlocked: bool,
}

impl Playhead {
    /// Moves the playhead forward and returns the events this produced.
    fn advance(&mut self, secs: f64) -> Vec<ResourceEvent> {
        if !self.playing || self.duration <= 0.0 {
            return Vec::new();
        }
        self.position += secs;
        let mut events = Vec::with_capacity(2);
        if self.position >= self.duration {
            if self.looping {
                self.position %= self.duration;
            } else {
                self.position = self.duration;
                self.playing = false;
                events.push(ResourceEvent::new(
                    self.load,
                    ResourceEventKind::TimeUpdate(self.position),
                ));
                events.push(ResourceEvent::new(self.load, ResourceEventKind::Ended));
                return events;
            }
        }
        events.push(ResourceEvent::new(
            self.load,
            ResourceEventKind::TimeUpdate(self.position),
        ));
        events
    }
}

fn lock(state: &Mutex<Playhead>) -> MutexGuard<'_, Playhead> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Simulated playable resource.
#[derive(Debug)]
pub struct SimulatedResource {
    state: Arc<Mutex<Playhead>>,
    policy: AutoplayPolicy,
    track_secs: f64,
    latency: Duration,
    sink: Option<EventSink>,
    playhead: Option<Ticker>,
}

impl SimulatedResource {
    pub fn new(policy: AutoplayPolicy) -> Self {
        Self {
            state: Arc::new(Mutex::new(Playhead {
                load: LoadId::first(),
                position: 0.0,
                duration: 0.0,
                playing: false,
                looping: false,
                unlocked: false,
            })),
            policy,
            track_secs: DEFAULT_SIMULATED_TRACK_SECS,
            latency: Duration::from_millis(DEFAULT_SIMULATED_PLAY_LATENCY_MS),
            sink: None,
            playhead: None,
        }
    }

    /// Sets the length reported for every loaded track.
    #[must_use]
    pub fn with_track_secs(mut self, secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            self.track_secs = secs;
        }
        self
    }

    /// Sets how long play requests take to settle.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn policy(&self) -> AutoplayPolicy {
        self.policy
    }

    /// Returns true while the simulated element is actually producing sound.
    pub fn is_playing(&self) -> bool {
        lock(&self.state).playing
    }

    fn emit(&self, event: ResourceEvent) {
        if let Some(sink) = &self.sink {
            sink.emit(event);
        }
    }
}

impl AudioResource for SimulatedResource {
    /// Registers the sink and starts the playhead task.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    fn subscribe(&mut self, sink: EventSink) {
        let state = Arc::clone(&self.state);
        let task_sink = sink.clone();
        let period = Duration::from_millis(SIMULATED_PLAYHEAD_INTERVAL_MS);
        self.playhead = Some(Ticker::spawn(period, move || {
            let events = lock(&state).advance(period.as_secs_f64());
            events.into_iter().all(|event| task_sink.emit(event))
        }));
        self.sink = Some(sink);
    }

    fn load(&mut self, track: &Track, load: LoadId) {
        {
            let mut head = lock(&self.state);
            head.load = load;
            head.position = 0.0;
            head.duration = self.track_secs;
            head.playing = false;
            head.looping = track.looping;
        }
        log::debug!("simulated resource loaded {}", track.source);
        self.emit(ResourceEvent::new(
            load,
            ResourceEventKind::MetadataLoaded {
                duration: self.track_secs,
            },
        ));
    }

    fn play(&mut self, origin: PlayOrigin) -> PlayFuture {
        let state = Arc::clone(&self.state);
        let policy = self.policy;
        let latency = self.latency;
        let requested = lock(&self.state).load;

        Box::pin(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let mut head = lock(&state);
            if head.load != requested {
                return Err(PlaybackError::Aborted);
            }
            let allowed = match origin {
                PlayOrigin::UserGesture => true,
                PlayOrigin::Autoplay => policy == AutoplayPolicy::Allowed || head.unlocked,
            };
            if !allowed {
                return Err(PlaybackError::Rejected(
                    "NotAllowedError: play() failed because the user didn't interact first".into(),
                ));
            }
            if origin == PlayOrigin::UserGesture {
                head.unlocked = true;
            }
            if !head.looping && head.duration > 0.0 && head.position >= head.duration {
                // replaying an ended track starts over
                head.position = 0.0;
            }
            head.playing = true;
            Ok(())
        })
    }

    fn pause(&mut self) {
        lock(&self.state).playing = false;
    }

    fn current_time(&self) -> f64 {
        lock(&self.state).position
    }

    fn set_current_time(&mut self, secs: f64) {
        let mut head = lock(&self.state);
        head.position = secs.clamp(0.0, head.duration.max(0.0));
    }

    fn duration(&self) -> Option<f64> {
        let duration = lock(&self.state).duration;
        (duration > 0.0).then_some(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use tokio::sync::mpsc;

    fn track() -> Track {
        Track::new("Song", "Band", "/song.mp3")
    }

    fn subscribed(
        resource: &mut SimulatedResource,
    ) -> mpsc::UnboundedReceiver<ResourceEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        resource.subscribe(EventSink::new(move |event| tx.send(event).is_ok()));
        rx
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_is_refused_until_a_gesture() {
        let mut resource = SimulatedResource::new(AutoplayPolicy::RequiresGesture);
        resource.load(&track(), LoadId::first());

        let refused = resource.play(PlayOrigin::Autoplay).await;
        assert!(matches!(refused, Err(PlaybackError::Rejected(_))));
        assert!(!resource.is_playing());

        assert!(resource.play(PlayOrigin::UserGesture).await.is_ok());
        resource.pause();
        assert!(resource.play(PlayOrigin::Autoplay).await.is_ok());
        assert!(resource.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn permissive_policy_allows_autoplay() {
        let mut resource = SimulatedResource::new(AutoplayPolicy::Allowed);
        resource.load(&track(), LoadId::first());
        assert!(resource.play(PlayOrigin::Autoplay).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn reload_aborts_pending_play() {
        let mut resource = SimulatedResource::new(AutoplayPolicy::Allowed);
        resource.load(&track(), LoadId::first());
        let pending = resource.play(PlayOrigin::UserGesture);
        resource.load(&track(), LoadId::first().next());

        assert_eq!(pending.await, Err(PlaybackError::Aborted));
        assert!(!resource.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn load_reports_metadata() {
        let mut resource = SimulatedResource::new(AutoplayPolicy::Allowed).with_track_secs(42.0);
        let mut rx = subscribed(&mut resource);
        resource.load(&track(), LoadId::first());

        let event = rx.recv().await.expect("metadata event");
        assert_eq!(
            event.kind,
            ResourceEventKind::MetadataLoaded { duration: 42.0 }
        );
        assert_eq!(resource.duration(), Some(42.0));
    }

    #[tokio::test(start_paused = true)]
    async fn playhead_runs_to_the_end() {
        let mut resource = SimulatedResource::new(AutoplayPolicy::Allowed).with_track_secs(1.0);
        let mut rx = subscribed(&mut resource);
        resource.load(&track(), LoadId::first());
        resource.play(PlayOrigin::UserGesture).await.expect("allowed");

        tokio::time::sleep(Duration::from_secs(2)).await;

        let mut ended = 0;
        let mut last_time = 0.0;
        while let Ok(event) = rx.try_recv() {
            match event.kind {
                ResourceEventKind::TimeUpdate(t) => last_time = t,
                ResourceEventKind::Ended => ended += 1,
                ResourceEventKind::MetadataLoaded { .. } => {}
            }
        }
        assert_eq!(ended, 1);
        assert_abs_diff_eq!(last_time, 1.0);
        assert!(!resource.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn ended_track_replays_from_the_start() {
        let mut resource = SimulatedResource::new(AutoplayPolicy::Allowed).with_track_secs(1.0);
        let mut rx = subscribed(&mut resource);
        resource.load(&track(), LoadId::first());
        resource.play(PlayOrigin::UserGesture).await.expect("allowed");
        tokio::time::sleep(Duration::from_secs(2)).await;
        while rx.try_recv().is_ok() {}
        assert_abs_diff_eq!(resource.current_time(), 1.0);

        resource.play(PlayOrigin::UserGesture).await.expect("allowed");
        assert_abs_diff_eq!(resource.current_time(), 0.0);
        tokio::time::sleep(Duration::from_millis(300)).await;

        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            kinds.push(event.kind);
        }
        assert_eq!(kinds, vec![ResourceEventKind::TimeUpdate(0.25)]);
        assert!(resource.is_playing());
    }

    #[test]
    fn looping_track_wraps_instead_of_ending() {
        let mut head = Playhead {
            load: LoadId::first(),
            position: 0.9,
            duration: 1.0,
            playing: true,
            looping: true,
            unlocked: true,
        };
        let events = head.advance(0.25);
        assert_eq!(events.len(), 1);
        assert!(head.playing);
        assert_abs_diff_eq!(head.position, 0.15, epsilon = 1e-9);
    }

    #[test]
    fn seek_is_clamped_to_track() {
        let mut resource = SimulatedResource::new(AutoplayPolicy::Allowed).with_track_secs(10.0);
        resource.load(&track(), LoadId::first());
        resource.set_current_time(25.0);
        assert_abs_diff_eq!(resource.current_time(), 10.0);
    }
}
