// SPDX-License-Identifier: MPL-2.0
//! Static track catalog.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One playable entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Locator handed to the audio resource (path or URL).
    pub source: String,
    /// The resource restarts the track itself instead of ending.
    #[serde(default)]
    pub looping: bool,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            source: source.into(),
            looping: false,
        }
    }

    #[must_use]
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }
}

/// Ordered, index-addressable list of tracks. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackCatalog {
    tracks: Vec<Track>,
}

impl TrackCatalog {
    /// Builds a catalog, rejecting an empty track list.
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(Error::Config("track catalog has no tracks".into()));
        }
        Ok(Self { tracks })
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Returns the first track, which is loaded at startup.
    pub fn first(&self) -> &Track {
        &self.tracks[0]
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }
}

impl Default for TrackCatalog {
    fn default() -> Self {
        Self {
            tracks: vec![Track::new("Lagu Hera", "Bobby", "/lagu-hera.mp3").looping()],
        }
    }
}
