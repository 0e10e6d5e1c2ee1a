//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time arrives as a plain `dt` in seconds
//! - Randomness only through an injected, seedable RNG
//! - Fixed pass order (pets, then bad guys, then resolution)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{in_capture_range, nearest_pet, within_radius};
pub use spawn::{spawn_bad_guy, spawn_pet};
pub use state::{
    BadGuy, Character, Facing, GameEvent, GamePhase, GameState, Gate, Pet, PetKind, Playfield,
};
pub use tick::{TickInput, tick};
