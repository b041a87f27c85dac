// SPDX-License-Identifier: MPL-2.0
//! Slide descriptors and the ordered deck they form.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Index;

/// Stable identity of a slide, used to key its controllers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideKey(String);

impl SlideKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SlideKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl fmt::Display for SlideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Micro-interaction hosted by a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Interaction {
    /// Narrative content only.
    #[default]
    #[serde(rename = "none")]
    Static,
    /// Press-and-sustain gesture.
    Hold,
    /// One-shot reveal of hidden content.
    Reveal,
    /// Tap-to-cycle through `items` entries.
    Stepper { items: NonZeroUsize },
}

/// Immutable description of one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    pub key: SlideKey,
    /// Name of the view the host renders for this slide.
    pub renderer: String,
    /// Leaving this slide forward makes the deferred autoplay attempt.
    #[serde(default)]
    pub audio_gate: bool,
    #[serde(default)]
    pub interaction: Interaction,
}

impl SlideDescriptor {
    pub fn new(key: impl Into<String>, renderer: impl Into<String>) -> Self {
        Self {
            key: SlideKey::new(key),
            renderer: renderer.into(),
            audio_gate: false,
            interaction: Interaction::Static,
        }
    }

    #[must_use]
    pub fn with_audio_gate(mut self) -> Self {
        self.audio_gate = true;
        self
    }

    #[must_use]
    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interaction = interaction;
        self
    }
}

/// Ordered, non-empty list of slides with unique keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideDeck {
    slides: Vec<SlideDescriptor>,
}

impl SlideDeck {
    pub fn new(slides: Vec<SlideDescriptor>) -> Result<Self> {
        if slides.is_empty() {
            return Err(Error::Config("deck has no slides".into()));
        }
        let mut seen = HashSet::new();
        for slide in &slides {
            if !seen.insert(&slide.key) {
                return Err(Error::Config(format!("duplicate slide key '{}'", slide.key)));
            }
        }
        Ok(Self { slides })
    }

    /// The stock eight-slide narrative.
    pub fn narrative() -> Self {
        let items = |n: usize| NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN);
        Self {
            slides: vec![
                SlideDescriptor::new("hero", "hero").with_audio_gate(),
                SlideDescriptor::new("timeline", "timeline")
                    .with_interaction(Interaction::Stepper { items: items(4) }),
                SlideDescriptor::new("lyrics", "lyrics"),
                SlideDescriptor::new("reasons", "reasons"),
                SlideDescriptor::new("heart", "heart-drawing").with_interaction(Interaction::Hold),
                SlideDescriptor::new("letter", "letter"),
                SlideDescriptor::new("gift", "gift").with_interaction(Interaction::Reveal),
                SlideDescriptor::new("finale", "finale"),
            ],
        }
    }

    pub fn get(&self, index: usize) -> Option<&SlideDescriptor> {
        self.slides.get(index)
    }

    /// Returns the index of the slide with `key`.
    pub fn position(&self, key: &SlideKey) -> Option<usize> {
        self.slides.iter().position(|slide| &slide.key == key)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlideDescriptor> {
        self.slides.iter()
    }
}

impl Index<usize> for SlideDeck {
    type Output = SlideDescriptor;

    fn index(&self, index: usize) -> &SlideDescriptor {
        &self.slides[index]
    }
}
