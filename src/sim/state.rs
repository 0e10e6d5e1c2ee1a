//! Game state and core simulation types
//!
//! Plain serializable value state: playfield geometry, the three entity
//! kinds, and the round bookkeeping the tick mutates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first round; simulation and spawners inactive
    Idle,
    /// Active gameplay
    Playing,
    /// A pet was caught; the final score stays readable until the next round
    GameOver,
}

/// Playfield geometry in screen coordinates (y grows downward)
///
/// Supplied by the host and replaceable at runtime on resize. The gate is
/// derived on demand so it can never go stale against the current width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    /// Vertical position of the wall that splits the character's half from the approach lane
    pub wall_y: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32, wall_y: f32) -> Self {
        Self {
            width,
            height,
            wall_y,
        }
    }

    /// The gate opening: capped at 100 units or 10% of the width, whichever
    /// is smaller, horizontally centered on the wall
    pub fn gate(&self) -> Gate {
        let width = GATE_MAX_WIDTH.min(self.width * GATE_WIDTH_FRACTION);
        Gate {
            x: (self.width - width) / 2.0,
            y: self.wall_y,
            width,
        }
    }

    /// True when `pos` is within `margin` of any playfield edge
    pub fn near_edge(&self, pos: Vec2, margin: f32) -> bool {
        pos.x <= margin
            || pos.x >= self.width - margin
            || pos.y <= margin
            || pos.y >= self.height - margin
    }

    /// Clamp a pointer sample into the character's region: the full width,
    /// from the top edge down to just above the wall
    pub fn clamp_character(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            pos.x.clamp(0.0, self.width),
            pos.y.clamp(0.0, (self.wall_y - CHARACTER_WALL_GAP).max(0.0)),
        )
    }
}

/// The opening in the wall that pets are funneled toward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// Left end of the opening
    pub x: f32,
    /// Vertical position (the wall line)
    pub y: f32,
    pub width: f32,
}

impl Gate {
    /// Steering target for spawns and edge recovery: the gate's midpoint
    #[inline]
    pub fn target(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y)
    }

    /// True when `x` falls within the opening's horizontal span
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x >= self.x && x <= self.x + self.width
    }
}

/// Horizontal facing, used by the presentation layer to mirror sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Facing implied by a horizontal velocity; `None` when there is no signal
    pub fn from_vx(vx: f32) -> Option<Self> {
        if vx < 0.0 {
            Some(Facing::Left)
        } else if vx > 0.0 {
            Some(Facing::Right)
        } else {
            None
        }
    }
}

/// Pet flavor; cosmetic, the presentation picks a sprite by it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetKind {
    Cat,
    Dog,
}

/// The player's avatar; position tracks the pointer exactly
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Character {
    pub pos: Vec2,
    pub facing: Facing,
}

impl Character {
    /// Apply a pointer sample: clamp into the character's region, then derive
    /// facing from the horizontal delta, ignoring sub-unit jitter
    pub fn track_pointer(&mut self, sample: Vec2, field: &Playfield) {
        let clamped = field.clamp_character(sample);
        let dx = clamped.x - self.pos.x;
        if dx.abs() > FACING_DEADZONE {
            self.facing = if dx < 0.0 { Facing::Left } else { Facing::Right };
        }
        self.pos = clamped;
    }
}

/// A pet wandering down from the top edge toward the gate
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PetKind,
    pub facing: Facing,
}

/// A pursuer; spawns on the bottom edge and hunts pets once through the gate
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BadGuy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
}

impl BadGuy {
    /// True once the bad guy has left the board: past the top edge, or out a
    /// side while at or above the wall. Side exits below the wall stay live,
    /// the pursuit turn will bring them back.
    pub fn out_of_play(&self, field: &Playfield) -> bool {
        self.pos.y <= 0.0
            || (self.pos.y <= field.wall_y && (self.pos.x < 0.0 || self.pos.x > field.width))
    }
}

/// Notifications for the presentation layer, emitted by [`super::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Pets scooped up by the character this frame
    PetsRescued { count: u32 },
    /// A bad guy reached a pet; the round is over
    RoundOver { score: u32 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub field: Playfield,
    pub character: Character,
    pub pets: Vec<Pet>,
    pub bad_guys: Vec<BadGuy>,
    /// Pets rescued this round; frozen for display after the round ends
    pub score: u32,
    pub phase: GamePhase,
}

impl GameState {
    /// Create an idle state; the character starts centered, just above the wall
    pub fn new(field: Playfield) -> Self {
        Self {
            character: Character {
                pos: Vec2::new(field.width / 2.0, field.wall_y - 30.0),
                facing: Facing::Right,
            },
            field,
            pets: Vec::new(),
            bad_guys: Vec::new(),
            score: 0,
            phase: GamePhase::Idle,
        }
    }

    /// Start (or restart) a round: empty board, score back to zero
    pub fn begin_round(&mut self) {
        self.pets.clear();
        self.bad_guys.clear();
        self.score = 0;
        self.phase = GamePhase::Playing;
    }

    /// End the round on a capture. Both entity lists are cleared in the same
    /// step as the phase change; the score is left frozen for display.
    pub fn end_round(&mut self) {
        self.pets.clear();
        self.bad_guys.clear();
        self.phase = GamePhase::GameOver;
    }

    /// Adopt new playfield geometry (host resize) mid-round. Only the
    /// character is re-clamped; pets and bad guys already in flight keep
    /// their positions and recover via normal edge steering.
    pub fn resize(&mut self, field: Playfield) {
        self.field = field;
        self.character.pos = field.clamp_character(self.character.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop_field() -> Playfield {
        Playfield::new(1000.0, 600.0, 300.0)
    }

    #[test]
    fn test_gate_capped_and_centered() {
        let gate = desktop_field().gate();
        assert_eq!(gate.width, 100.0);
        assert_eq!(gate.x, 450.0);
        assert_eq!(gate.y, 300.0);
        assert_eq!(gate.target(), Vec2::new(500.0, 300.0));
    }

    #[test]
    fn test_gate_shrinks_on_narrow_field() {
        let gate = Playfield::new(360.0, 640.0, 480.0).gate();
        assert_eq!(gate.width, 36.0);
        assert_eq!(gate.x, 162.0);
    }

    #[test]
    fn test_gate_span() {
        let gate = desktop_field().gate();
        assert!(gate.spans_x(450.0));
        assert!(gate.spans_x(550.0));
        assert!(!gate.spans_x(449.9));
        assert!(!gate.spans_x(550.1));
    }

    #[test]
    fn test_clamp_character_region() {
        let field = desktop_field();
        assert_eq!(
            field.clamp_character(Vec2::new(1200.0, 500.0)),
            Vec2::new(1000.0, 280.0)
        );
        assert_eq!(
            field.clamp_character(Vec2::new(-50.0, -50.0)),
            Vec2::new(0.0, 0.0)
        );
        let inside = Vec2::new(321.0, 123.0);
        assert_eq!(field.clamp_character(inside), inside);
    }

    #[test]
    fn test_near_edge_margins() {
        let field = desktop_field();
        assert!(field.near_edge(Vec2::new(10.0, 300.0), 10.0));
        assert!(field.near_edge(Vec2::new(990.0, 300.0), 10.0));
        assert!(field.near_edge(Vec2::new(500.0, 5.0), 10.0));
        assert!(field.near_edge(Vec2::new(500.0, 595.0), 10.0));
        assert!(!field.near_edge(Vec2::new(11.0, 300.0), 10.0));
        assert!(!field.near_edge(Vec2::new(500.0, 300.0), 10.0));
    }

    #[test]
    fn test_track_pointer_facing_deadzone() {
        let field = desktop_field();
        let mut character = Character {
            pos: Vec2::new(100.0, 100.0),
            facing: Facing::Right,
        };

        // Sub-unit jitter moves the character but keeps the facing
        character.track_pointer(Vec2::new(100.5, 100.0), &field);
        assert_eq!(character.pos.x, 100.5);
        assert_eq!(character.facing, Facing::Right);

        character.track_pointer(Vec2::new(95.0, 100.0), &field);
        assert_eq!(character.facing, Facing::Left);

        character.track_pointer(Vec2::new(200.0, 100.0), &field);
        assert_eq!(character.facing, Facing::Right);
    }

    #[test]
    fn test_bad_guy_out_of_play() {
        let field = desktop_field();
        let guy = |x: f32, y: f32| BadGuy {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            facing: Facing::Left,
        };

        assert!(guy(500.0, -5.0).out_of_play(&field));
        assert!(guy(500.0, 0.0).out_of_play(&field));
        assert!(guy(-5.0, 200.0).out_of_play(&field));
        assert!(guy(1005.0, 300.0).out_of_play(&field));
        // Side exit below the wall is not an exit
        assert!(!guy(-5.0, 400.0).out_of_play(&field));
        assert!(!guy(500.0, 500.0).out_of_play(&field));
    }

    #[test]
    fn test_resize_reclamps_character_only() {
        let mut state = GameState::new(desktop_field());
        state.begin_round();
        state.character.pos = Vec2::new(990.0, 270.0);
        state.pets.push(Pet {
            pos: Vec2::new(900.0, 50.0),
            vel: Vec2::new(0.0, 60.0),
            kind: PetKind::Cat,
            facing: Facing::Right,
        });

        state.resize(Playfield::new(360.0, 640.0, 480.0));

        assert_eq!(state.character.pos, Vec2::new(360.0, 270.0));
        // In-flight entities are left alone
        assert_eq!(state.pets[0].pos, Vec2::new(900.0, 50.0));
    }

    #[test]
    fn test_round_lifecycle_score_freeze() {
        let mut state = GameState::new(desktop_field());
        state.begin_round();
        state.score = 7;
        state.end_round();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 7);
        assert!(state.pets.is_empty() && state.bad_guys.is_empty());

        state.begin_round();
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
