// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Hold Gesture**: Tick period and per-tick progress step
//! - **Celebration**: Burst parameters for completion effects
//! - **Simulated Audio**: Track length, playhead cadence, play latency

// ==========================================================================
// Hold Gesture Defaults
// ==========================================================================

/// Progress value at which a hold gesture completes.
pub const HOLD_PROGRESS_MAX: u8 = 100;

/// Default period between hold gesture ticks (in milliseconds).
/// With a step of 1 this completes a gesture in three seconds.
pub const DEFAULT_HOLD_TICK_MS: u64 = 30;

/// Minimum hold tick period (in milliseconds).
pub const MIN_HOLD_TICK_MS: u64 = 5;

/// Maximum hold tick period (in milliseconds).
pub const MAX_HOLD_TICK_MS: u64 = 500;

/// Default progress units added per tick.
pub const DEFAULT_HOLD_STEP: u8 = 1;

/// Minimum progress units per tick.
pub const MIN_HOLD_STEP: u8 = 1;

/// Maximum progress units per tick.
pub const MAX_HOLD_STEP: u8 = HOLD_PROGRESS_MAX;

// ==========================================================================
// Celebration Defaults
// ==========================================================================

/// Particle count of the burst fired when hidden content is revealed.
pub const REVEAL_BURST_PARTICLES: u32 = 200;

/// Particle count of the burst fired when a hold gesture completes.
pub const HOLD_BURST_PARTICLES: u32 = 150;

/// Upper bound for any burst's particle count.
pub const MAX_BURST_PARTICLES: u32 = 1_000;

/// Spread of a burst (in degrees).
pub const DEFAULT_BURST_SPREAD_DEG: f32 = 80.0;

/// Vertical origin of a reveal burst, as a fraction of the viewport height.
pub const REVEAL_BURST_ORIGIN_Y: f32 = 0.6;

// ==========================================================================
// Simulated Audio Defaults
// ==========================================================================

/// Length reported by the simulated resource for every track (in seconds).
pub const DEFAULT_SIMULATED_TRACK_SECS: f64 = 180.0;

/// Period between simulated playhead time updates (in milliseconds).
pub const SIMULATED_PLAYHEAD_INTERVAL_MS: u64 = 250;

/// Delay before a simulated play request settles (in milliseconds).
pub const DEFAULT_SIMULATED_PLAY_LATENCY_MS: u64 = 20;
