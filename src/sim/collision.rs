//! Proximity queries for rescues, captures, and pursuit targeting
//!
//! Everything is straight-line distance over small in-memory lists. The one
//! subtlety is the tie-break on the nearest-pet search, which pursuit relies
//! on being deterministic.

use glam::Vec2;

use super::state::{BadGuy, Pet};

/// True when two points are strictly closer than `radius`
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Index of the pet nearest to `pos`, or `None` when there are no pets
///
/// Scans in index order with a strict comparison, so an exact distance tie
/// keeps the earlier pet: the lowest index wins.
pub fn nearest_pet(pos: Vec2, pets: &[Pet]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, pet) in pets.iter().enumerate() {
        let dist_sq = pos.distance_squared(pet.pos);
        if best.is_none_or(|(_, best_sq)| dist_sq < best_sq) {
            best = Some((i, dist_sq));
        }
    }
    best.map(|(i, _)| i)
}

/// True when any bad guy is within capture range of `pet`
pub fn in_capture_range(pet: &Pet, bad_guys: &[BadGuy], radius: f32) -> bool {
    bad_guys
        .iter()
        .any(|guy| within_radius(guy.pos, pet.pos, radius))
}
