//! Per-frame simulation advance
//!
//! One call per animation frame with the measured wall-clock delta. The pass
//! order is fixed: pointer input, pets, bad guys (reading the already-updated
//! pet list for pursuit), then rescue and capture resolution.

use glam::Vec2;

use super::collision::{in_capture_range, nearest_pet, within_radius};
use super::state::{BadGuy, Facing, GameEvent, GamePhase, GameState, Pet, Playfield};
use crate::consts::*;
use crate::heading;

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Latest pointer/touch position, relative to the playfield origin
    pub pointer: Option<Vec2>,
}

/// Advance the round by `dt` seconds
///
/// Outside [`GamePhase::Playing`] this is a no-op. Returns the events the
/// presentation layer cares about; [`GameEvent::RoundOver`] means the caller
/// must stop scheduling frames until the next round starts.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    if state.phase != GamePhase::Playing {
        return Vec::new();
    }

    // Character follows the pointer exactly, no smoothing
    if let Some(sample) = input.pointer {
        let field = state.field;
        state.character.track_pointer(sample, &field);
    }

    update_pets(&mut state.pets, &state.field, dt);
    update_bad_guys(&mut state.bad_guys, &state.pets, &state.field, dt);

    resolve(state)
}

/// Move pets and steer them: pin delivered pets to the wall line, turn strays
/// near an edge back toward the gate at unchanged speed
fn update_pets(pets: &mut [Pet], field: &Playfield, dt: f32) {
    let gate = field.gate();
    for pet in pets.iter_mut() {
        pet.pos += pet.vel * dt;

        if pet.pos.y >= gate.y && gate.spans_x(pet.pos.x) {
            // Delivered: held on the wall line. Velocity is left untouched so
            // x keeps drifting along the opening.
            pet.pos.y = gate.y;
        } else if field.near_edge(pet.pos, EDGE_MARGIN) {
            let speed = pet.vel.length();
            pet.vel = heading(pet.pos, gate.target()) * speed;
        }

        if let Some(facing) = Facing::from_vx(pet.vel.x) {
            pet.facing = facing;
        }
    }
}

/// Move bad guys, drop the ones that left the board, and turn the rest toward
/// their nearest pet (at unchanged speed) once they are at or above the wall
fn update_bad_guys(bad_guys: &mut Vec<BadGuy>, pets: &[Pet], field: &Playfield, dt: f32) {
    for guy in bad_guys.iter_mut() {
        guy.pos += guy.vel * dt;

        if guy.out_of_play(field) {
            continue;
        }

        if guy.pos.y <= field.wall_y {
            if let Some(target) = nearest_pet(guy.pos, pets) {
                let speed = guy.vel.length();
                guy.vel = heading(guy.pos, pets[target].pos) * speed;
            }
        }

        if let Some(facing) = Facing::from_vx(guy.vel.x) {
            guy.facing = facing;
        }
    }
    bad_guys.retain(|guy| !guy.out_of_play(field));
}

/// Rescue, then capture. A capture ends the round on the spot: the board is
/// cleared in the same step and this frame's rescues never reach the score.
fn resolve(state: &mut GameState) -> Vec<GameEvent> {
    let char_pos = state.character.pos;
    let mut rescued = 0u32;
    state.pets.retain(|pet| {
        if within_radius(char_pos, pet.pos, RESCUE_RADIUS) {
            rescued += 1;
            false
        } else {
            true
        }
    });

    let caught = state
        .pets
        .iter()
        .any(|pet| in_capture_range(pet, &state.bad_guys, CAPTURE_RADIUS));
    if caught {
        let score = state.score;
        state.end_round();
        return vec![GameEvent::RoundOver { score }];
    }

    state.score += rescued;
    if rescued > 0 {
        vec![GameEvent::PetsRescued { count: rescued }]
    } else {
        Vec::new()
    }
}
