// SPDX-License-Identifier: MPL-2.0
//! `storydeck` is the controller core of a linear interactive presentation.
//!
//! It sequences narrative slides, drives the per-slide micro-interactions
//! (hold gesture, one-shot reveal, cyclic stepper) and manages a single
//! companion audio track under platform autoplay restrictions. Rendering is
//! left to the host, which reads [`presentation::SlideView`] and
//! [`audio::AudioSnapshot`] and receives bursts through a
//! [`celebration::CelebrationEmitter`].

#![doc(html_root_url = "https://docs.rs/storydeck/0.1.0")]

pub mod audio;
pub mod celebration;
pub mod config;
pub mod error;
pub mod interaction;
pub mod presentation;
pub mod sequencer;

#[cfg(test)]
pub(crate) mod test_utils;
