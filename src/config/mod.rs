// SPDX-License-Identifier: MPL-2.0
//! This module handles the presentation's static configuration, including
//! loading and saving the deck, track catalog and gesture timing from a
//! `deck.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use storydeck::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Make the hold gesture slower
//! config.hold_tick_ms = Some(50);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::audio::{Track, TrackCatalog};
use crate::error::Result;
use crate::interaction::{HoldStep, HoldTick};
use crate::presentation::{SlideDeck, SlideDescriptor};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "deck.toml";
const APP_NAME: &str = "StoryDeck";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub hold_tick_ms: Option<u64>,
    #[serde(default)]
    pub hold_step: Option<u8>,
    #[serde(default)]
    pub tracks: Option<Vec<Track>>,
    #[serde(default)]
    pub slides: Option<Vec<SlideDescriptor>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hold_tick_ms: Some(DEFAULT_HOLD_TICK_MS),
            hold_step: Some(DEFAULT_HOLD_STEP),
            tracks: None,
            slides: None,
        }
    }
}

impl Config {
    /// Returns the hold gesture tick period, clamped to its valid range.
    pub fn hold_tick(&self) -> HoldTick {
        self.hold_tick_ms.map(HoldTick::new).unwrap_or_default()
    }

    /// Returns the hold gesture step, clamped to its valid range.
    pub fn hold_step(&self) -> HoldStep {
        self.hold_step.map(HoldStep::new).unwrap_or_default()
    }

    /// Builds the track catalog, falling back to the stock catalog when
    /// no tracks are configured.
    ///
    /// Returns an error if the configured list is present but empty.
    pub fn catalog(&self) -> Result<TrackCatalog> {
        match &self.tracks {
            Some(tracks) => TrackCatalog::new(tracks.clone()),
            None => Ok(TrackCatalog::default()),
        }
    }

    /// Builds the slide deck, falling back to the stock narrative deck
    /// when no slides are configured.
    ///
    /// Returns an error if the configured list is empty or has duplicate keys.
    pub fn deck(&self) -> Result<SlideDeck> {
        match &self.slides {
            Some(slides) => SlideDeck::new(slides.clone()),
            None => Ok(SlideDeck::narrative()),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("Ignoring invalid config {:?}: {}", path, err);
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::presentation::Interaction;
    use std::num::NonZeroUsize;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_deck() {
        let config = Config {
            hold_tick_ms: Some(40),
            hold_step: Some(2),
            tracks: Some(vec![Track::new("Song", "Band", "/song.mp3")]),
            slides: Some(vec![
                SlideDescriptor::new("intro", "hero").with_audio_gate(),
                SlideDescriptor::new("story", "timeline").with_interaction(
                    Interaction::Stepper {
                        items: NonZeroUsize::new(3).expect("non-zero"),
                    },
                ),
            ]),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("deck.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deck.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn load_from_missing_path_is_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn parses_hand_written_deck() {
        let content = r#"
            hold_tick_ms = 1000

            [[tracks]]
            title = "Theme"
            artist = "Someone"
            source = "/theme.mp3"
            looping = true

            [[slides]]
            key = "hero"
            renderer = "hero"
            audio_gate = true

            [[slides]]
            key = "gift"
            renderer = "gift"
            interaction = { kind = "reveal" }
        "#;
        let config: Config = toml::from_str(content).expect("valid toml");

        assert_eq!(config.hold_tick().as_duration().as_millis(), 500);
        let deck = config.deck().expect("valid deck");
        assert_eq!(deck.len(), 2);
        assert!(deck.get(0).expect("first slide").audio_gate);
        assert_eq!(deck.get(1).expect("second slide").interaction, Interaction::Reveal);
        let catalog = config.catalog().expect("valid catalog");
        assert!(catalog.get(0).expect("one track").looping);
    }

    #[test]
    fn empty_slide_list_is_config_error() {
        let config = Config {
            slides: Some(Vec::new()),
            ..Config::default()
        };
        assert!(matches!(config.deck(), Err(Error::Config(_))));
    }

    #[test]
    fn missing_sections_fall_back_to_stock_content() {
        let config = Config::default();
        assert_eq!(config.deck().expect("stock deck").len(), 8);
        assert_eq!(config.catalog().expect("stock catalog").len(), 1);
        assert_eq!(config.hold_tick(), HoldTick::default());
        assert_eq!(config.hold_step(), HoldStep::default());
    }
}
