//! Pet Rescue - a pointer-herding rescue minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entity movement, spawning, collisions, round state)
//! - `session`: Round lifecycle, spawn timers, and the frame-scheduling contract
//!
//! The browser host in `main.rs` is a thin consumer: it forwards pointer
//! samples and animation-frame timestamps into a [`session::Session`] and
//! mirrors whatever state comes back into the DOM.

pub mod session;
pub mod sim;

pub use session::{FrameControl, FrameReport, Session};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Pet cruise speed (units/sec), set once at spawn
    pub const PET_SPEED: f32 = 60.0;
    /// Bad guy speed (units/sec) - double pet speed
    pub const BAD_GUY_SPEED: f32 = 120.0;

    /// Distance below which the character scoops up a pet
    pub const RESCUE_RADIUS: f32 = 20.0;
    /// Distance below which a bad guy catches a pet (ends the round)
    pub const CAPTURE_RADIUS: f32 = 15.0;

    /// Being within this margin of a playfield edge steers a pet back toward the gate
    pub const EDGE_MARGIN: f32 = 10.0;
    /// The character may not come closer to the wall than this
    pub const CHARACTER_WALL_GAP: f32 = 20.0;
    /// Pointer deltas at or below this many units do not flip the character's facing
    pub const FACING_DEADZONE: f32 = 1.0;

    /// Seconds between pet spawn attempts
    pub const PET_SPAWN_PERIOD: f32 = 2.0;
    /// Seconds between bad guy spawns
    pub const BAD_GUY_SPAWN_PERIOD: f32 = 3.0;
    /// Random placement draws before a pet spawn stops looking for a safe spot
    pub const PET_SPAWN_ATTEMPTS: u32 = 5;

    /// Gate width cap (units)
    pub const GATE_MAX_WIDTH: f32 = 100.0;
    /// Gate width as a fraction of playfield width
    pub const GATE_WIDTH_FRACTION: f32 = 0.1;

    /// Ceiling on a single frame's delta time (seconds), so a backgrounded
    /// tab doesn't come back with one giant teleporting step
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Unit vector pointing from `from` toward `to` (zero when the points coincide)
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}
