// SPDX-License-Identifier: MPL-2.0
//! Presentation root: composes navigation, audio and slide controllers.
//!
//! [`Presentation`] is the only surface the hosting shell talks to. It owns
//! the [`SlideSequencer`], the [`AudioSession`] and the controller of the
//! current slide. Background work (hold ticks, play requests, resource
//! events) never mutates state directly; it posts a [`Message`] into the
//! presentation's inbox and the host feeds those back through
//! [`Presentation::update`], [`Presentation::drain_messages`] or
//! [`Presentation::process_next`].

mod deck;
mod message;

pub use deck::{Interaction, SlideDeck, SlideDescriptor, SlideKey};
pub use message::{Message, Outbox};

use crate::audio::{
    AudioResource, AudioSession, AudioSnapshot, EventSink, PlayRequest, TrackCatalog,
};
use crate::celebration::{Celebration, CelebrationEmitter};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::interaction::{
    CyclicStepper, HoldGesture, HoldStep, HoldTick, InteractionView, RevealToggle,
    SlideController, TickSchedule, TickSink,
};
use crate::sequencer::{Direction, Marker, SlideSequencer, Transition};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Read model of the current slide for renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideView<'a> {
    pub index: usize,
    pub total: usize,
    pub direction: Direction,
    pub key: &'a SlideKey,
    pub renderer: &'a str,
    pub has_next: bool,
    pub has_previous: bool,
    /// `None` for slides without a micro-interaction.
    pub interaction: Option<InteractionView>,
}

/// Root controller of one presentation run.
pub struct Presentation<R, E> {
    deck: SlideDeck,
    sequencer: SlideSequencer,
    audio: AudioSession<R>,
    /// Only the current slide has an entry.
    controllers: HashMap<SlideKey, SlideController>,
    emitter: E,
    hold_tick: HoldTick,
    hold_step: HoldStep,
    /// Hold gestures are advanced by the host instead of a timer.
    manual_hold: bool,
    /// First generation handed to the next hold gesture; always above any
    /// generation a torn-down gesture stamped on queued ticks.
    hold_generation: u64,
    outbox: Outbox,
    inbox: mpsc::UnboundedReceiver<Message>,
}

impl<R, E> Presentation<R, E>
where
    R: AudioResource,
    E: CelebrationEmitter,
{
    /// Builds the presentation positioned on the first slide.
    ///
    /// The resource is subscribed before the first track is loaded so its
    /// metadata event reaches the inbox.
    ///
    /// # Panics
    ///
    /// Resources that spawn background tasks on subscription panic outside
    /// a Tokio runtime.
    pub fn new(
        deck: SlideDeck,
        catalog: TrackCatalog,
        mut resource: R,
        emitter: E,
    ) -> Result<Self> {
        let sequencer = SlideSequencer::new(deck.len())
            .ok_or_else(|| Error::Config("deck has no slides".into()))?;
        let (outbox, inbox) = Outbox::channel();

        let events = outbox.clone();
        resource.subscribe(EventSink::new(move |event| {
            events.post(Message::Resource(event))
        }));

        let mut presentation = Self {
            deck,
            sequencer,
            audio: AudioSession::new(resource, catalog),
            controllers: HashMap::new(),
            emitter,
            hold_tick: HoldTick::default(),
            hold_step: HoldStep::default(),
            manual_hold: false,
            hold_generation: 0,
            outbox,
            inbox,
        };
        presentation.enter(0);
        Ok(presentation)
    }

    /// Builds the presentation from a loaded configuration.
    pub fn from_config(config: &Config, resource: R, emitter: E) -> Result<Self> {
        let presentation = Self::new(config.deck()?, config.catalog()?, resource, emitter)?;
        Ok(presentation.with_hold_timing(config.hold_tick(), config.hold_step()))
    }

    /// Replaces the hold gesture timing. The current slide's controller is
    /// rebuilt so the new timing applies immediately.
    #[must_use]
    pub fn with_hold_timing(mut self, tick: HoldTick, step: HoldStep) -> Self {
        self.hold_tick = tick;
        self.hold_step = step;
        self.rebuild_current();
        self
    }

    /// Makes hold gestures advance only through
    /// [`Presentation::advance_hold`], for hosts driving their own frame
    /// clock.
    #[must_use]
    pub fn with_manual_hold(mut self) -> Self {
        self.manual_hold = true;
        self.rebuild_current();
        self
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn next(&mut self) -> Option<Transition> {
        let transition = self.sequencer.next();
        self.apply(transition)
    }

    pub fn prev(&mut self) -> Option<Transition> {
        let transition = self.sequencer.prev();
        self.apply(transition)
    }

    /// Jumps to slide `target`. Out-of-range targets are ignored.
    pub fn jump_to(&mut self, target: isize) -> Option<Transition> {
        let transition = self.sequencer.go_to(target);
        self.apply(transition)
    }

    pub fn index(&self) -> usize {
        self.sequencer.index()
    }

    pub fn direction(&self) -> Direction {
        self.sequencer.direction()
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.sequencer.markers()
    }

    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    // =========================================================================
    // Slide interactions
    // =========================================================================

    /// Presses the hold gesture on the current slide.
    pub fn press(&mut self) -> bool {
        self.current_controller()
            .and_then(SlideController::as_hold_mut)
            .is_some_and(HoldGesture::start)
    }

    /// Releases the hold gesture on the current slide.
    pub fn release(&mut self) -> bool {
        self.current_controller()
            .and_then(SlideController::as_hold_mut)
            .is_some_and(HoldGesture::stop)
    }

    /// Advances the held gesture by one step.
    ///
    /// Only gestures without a running timer are advanced; see
    /// [`Presentation::with_manual_hold`].
    pub fn advance_hold(&mut self) -> bool {
        let celebration = self
            .current_controller()
            .and_then(SlideController::as_hold_mut)
            .filter(|gesture| !gesture.has_live_timer())
            .and_then(HoldGesture::tick);
        self.celebrate(celebration)
    }

    /// Opens the reveal on the current slide. Returns true on the one
    /// activation that fired the celebration.
    pub fn reveal(&mut self) -> bool {
        let celebration = self
            .current_controller()
            .and_then(SlideController::as_reveal_mut)
            .and_then(RevealToggle::activate);
        self.celebrate(celebration)
    }

    /// Cycles the stepper on the current slide, returning the new index.
    pub fn tap(&mut self) -> Option<usize> {
        self.current_controller()
            .and_then(SlideController::as_stepper_mut)
            .map(CyclicStepper::advance)
    }

    /// Selects a stepper entry directly.
    pub fn pick(&mut self, index: usize) -> bool {
        self.current_controller()
            .and_then(SlideController::as_stepper_mut)
            .is_some_and(|stepper| stepper.select(index))
    }

    // =========================================================================
    // Audio
    // =========================================================================

    /// Play/pause button.
    pub fn toggle_audio(&mut self) {
        if let Some(request) = self.audio.toggle() {
            self.spawn_play(request);
        }
    }

    pub fn switch_track(&mut self, index: usize) -> bool {
        self.audio.switch_track(index)
    }

    pub fn seek_to_fraction(&mut self, fraction: f64) -> bool {
        self.audio.seek_to_fraction(fraction)
    }

    pub fn audio(&self) -> &AudioSession<R> {
        &self.audio
    }

    pub fn audio_snapshot(&self) -> AudioSnapshot {
        self.audio.snapshot()
    }

    // =========================================================================
    // Message loop
    // =========================================================================

    /// Applies one message posted by a background task.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::HoldTick { slide, generation } => {
                let celebration = self
                    .controllers
                    .get_mut(&slide)
                    .and_then(SlideController::as_hold_mut)
                    .and_then(|gesture| gesture.on_tick(generation));
                self.celebrate(celebration);
            }
            Message::PlaySettled { ticket, outcome } => self.audio.settle(ticket, outcome),
            Message::Resource(event) => self.audio.handle_event(event),
        }
    }

    /// Applies every message already queued. Returns how many were applied.
    pub fn drain_messages(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.inbox.try_recv() {
            self.update(message);
            applied += 1;
        }
        applied
    }

    /// Waits for the next queued message without applying it.
    ///
    /// Cancel safe, so it can sit in a `tokio::select!` next to other input.
    pub async fn next_message(&mut self) -> Option<Message> {
        self.inbox.recv().await
    }

    /// Waits for the next message and applies it.
    pub async fn process_next(&mut self) -> bool {
        match self.next_message().await {
            Some(message) => {
                self.update(message);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub fn view(&self) -> SlideView<'_> {
        let index = self.sequencer.index();
        // the sequencer was sized from the deck
        let slide = &self.deck[index];
        SlideView {
            index,
            total: self.sequencer.total(),
            direction: self.sequencer.direction(),
            key: &slide.key,
            renderer: &slide.renderer,
            has_next: self.sequencer.has_next(),
            has_previous: self.sequencer.has_previous(),
            interaction: self.controllers.get(&slide.key).map(SlideController::view),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply(&mut self, transition: Option<Transition>) -> Option<Transition> {
        let transition = transition?;
        self.leave(transition.from);

        let gated = self
            .deck
            .get(transition.from)
            .is_some_and(|slide| slide.audio_gate);
        if gated && transition.direction.is_forward() {
            if let Some(request) = self.audio.autoplay() {
                self.spawn_play(request);
            }
        }

        self.enter(transition.to);
        log::debug!(
            "slide {} -> {} ({:?})",
            transition.from,
            transition.to,
            transition.direction
        );
        Some(transition)
    }

    /// Tears down the controller of slide `index`; a held gesture's timer
    /// is aborted with it.
    fn leave(&mut self, index: usize) {
        let Some(slide) = self.deck.get(index) else {
            return;
        };
        if let Some(SlideController::Hold(gesture)) = self.controllers.remove(&slide.key) {
            self.hold_generation = self.hold_generation.max(gesture.generation() + 1);
        }
    }

    fn rebuild_current(&mut self) {
        let index = self.sequencer.index();
        self.leave(index);
        self.enter(index);
    }

    /// Creates the controller for slide `index` if it hosts an interaction.
    fn enter(&mut self, index: usize) {
        let Some(slide) = self.deck.get(index) else {
            return;
        };
        let controller = match slide.interaction {
            Interaction::Static => return,
            Interaction::Hold if self.manual_hold => SlideController::Hold(
                HoldGesture::manual(self.hold_step).starting_at(self.hold_generation),
            ),
            Interaction::Hold => {
                let outbox = self.outbox.clone();
                let key = slide.key.clone();
                let sink: TickSink = Arc::new(move |generation| {
                    outbox.post(Message::HoldTick {
                        slide: key.clone(),
                        generation,
                    })
                });
                SlideController::Hold(
                    HoldGesture::scheduled(
                        self.hold_step,
                        TickSchedule::new(self.hold_tick, sink),
                    )
                    .starting_at(self.hold_generation),
                )
            }
            Interaction::Reveal => SlideController::Reveal(RevealToggle::new()),
            Interaction::Stepper { items } => SlideController::Stepper(CyclicStepper::new(items)),
        };
        self.controllers.insert(slide.key.clone(), controller);
    }

    fn current_controller(&mut self) -> Option<&mut SlideController> {
        let key = &self.deck.get(self.sequencer.index())?.key;
        self.controllers.get_mut(key)
    }

    fn celebrate(&self, celebration: Option<Celebration>) -> bool {
        match celebration {
            Some(celebration) => {
                self.emitter.emit(&celebration);
                true
            }
            None => false,
        }
    }

    /// Awaits the request on its own task and posts the outcome back.
    fn spawn_play(&self, request: PlayRequest) {
        let outbox = self.outbox.clone();
        tokio::spawn(async move {
            let (ticket, outcome) = request.settle().await;
            outbox.post(Message::PlaySettled { ticket, outcome });
        });
    }
}
