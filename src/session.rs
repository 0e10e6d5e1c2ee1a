//! Round lifecycle and frame scheduling
//!
//! The session is the single mutator of game state. The host forwards raw
//! pointer samples and animation-frame timestamps; the session owns the spawn
//! timers, the frame-delta clamp, and the tick. Stopping a round cancels the
//! timers and tells the host (via [`FrameControl::Stop`]) to quit requesting
//! frames, and a late callback into a stopped session mutates nothing.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::sim::{
    GameEvent, GamePhase, GameState, Playfield, TickInput, spawn_bad_guy, spawn_pet, tick,
};

/// A cancellable fixed-period accumulator
///
/// Stands in for a host-side interval timer: `arm` is the registration,
/// `cancel` the token. A cancelled timer never fires no matter how much time
/// is pushed through it.
#[derive(Debug, Clone)]
struct IntervalTimer {
    period: f32,
    elapsed: f32,
    armed: bool,
}

impl IntervalTimer {
    fn new(period: f32) -> Self {
        Self {
            period,
            elapsed: 0.0,
            armed: false,
        }
    }

    fn arm(&mut self) {
        self.elapsed = 0.0;
        self.armed = true;
    }

    fn cancel(&mut self) {
        self.elapsed = 0.0;
        self.armed = false;
    }

    /// Push `dt` seconds through the timer, returning how often it fired
    fn advance(&mut self, dt: f32) -> u32 {
        if !self.armed {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// Whether the host should keep scheduling animation frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Stop,
}

/// Outcome of one [`Session::frame`] call
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub control: FrameControl,
    pub events: Vec<GameEvent>,
}

impl FrameReport {
    fn stopped() -> Self {
        Self {
            control: FrameControl::Stop,
            events: Vec::new(),
        }
    }
}

/// Owns a run of rounds: game state, RNG, latest input, the frame-time
/// baseline, and both spawn timers
pub struct Session {
    state: GameState,
    rng: Pcg32,
    input: TickInput,
    /// Timestamp (ms) of the previous frame. `None` right after a (re)start,
    /// which makes the first delta of a round zero.
    last_time_ms: Option<f64>,
    pet_timer: IntervalTimer,
    bad_guy_timer: IntervalTimer,
}

impl Session {
    pub fn new(field: Playfield, seed: u64) -> Self {
        log::info!(
            "session created: {}x{} field, wall at {}, seed {seed}",
            field.width,
            field.height,
            field.wall_y
        );
        Self {
            state: GameState::new(field),
            rng: Pcg32::seed_from_u64(seed),
            input: TickInput::default(),
            last_time_ms: None,
            pet_timer: IntervalTimer::new(PET_SPAWN_PERIOD),
            bad_guy_timer: IntervalTimer::new(BAD_GUY_SPAWN_PERIOD),
        }
    }

    /// Current state, for rendering
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Begin a round from `Idle` or `GameOver`: fresh board, zero score,
    /// armed spawn timers, dropped time baseline.
    ///
    /// Returns `true` when a round actually began; the host uses this to kick
    /// the frame loop exactly once. While already playing this is a no-op.
    pub fn start(&mut self) -> bool {
        if self.state.phase == GamePhase::Playing {
            return false;
        }
        self.state.begin_round();
        self.pet_timer.arm();
        self.bad_guy_timer.arm();
        self.last_time_ms = None;
        log::info!("round started");
        true
    }

    /// Same contract as [`Session::start`]; reads better on a game-over screen
    pub fn restart(&mut self) -> bool {
        self.start()
    }

    /// Tear the round down: cancel both spawn timers and drop the time
    /// baseline. Idempotent, safe to call at any time. A round in progress
    /// goes back to `Idle` with the board cleared; a finished round keeps its
    /// frozen score on display.
    pub fn stop(&mut self) {
        self.pet_timer.cancel();
        self.bad_guy_timer.cancel();
        self.last_time_ms = None;
        if self.state.phase == GamePhase::Playing {
            self.state.pets.clear();
            self.state.bad_guys.clear();
            self.state.phase = GamePhase::Idle;
            log::info!("round stopped");
        }
    }

    /// Record a pointer/touch sample in playfield coordinates; the next tick
    /// applies it. Samples arriving outside a round are kept, they move the
    /// character as soon as play resumes.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.input.pointer = Some(Vec2::new(x, y));
    }

    /// Adopt new playfield geometry from the host without disturbing the round
    pub fn resize(&mut self, field: Playfield) {
        self.state.resize(field);
    }

    /// Drive one animation frame at host timestamp `now_ms`
    ///
    /// Outside `Playing` nothing is mutated and the host is told to stop
    /// scheduling. During play: clamp the frame delta, fire any due spawns,
    /// tick the simulation, and on a capture cancel the timers before
    /// reporting `Stop`.
    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        if self.state.phase != GamePhase::Playing {
            return FrameReport::stopped();
        }

        let dt = match self.last_time_ms {
            Some(prev) => (((now_ms - prev) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_time_ms = Some(now_ms);

        for _ in 0..self.pet_timer.advance(dt) {
            let pet = spawn_pet(&self.state.field, &self.state.bad_guys, &mut self.rng);
            self.state.pets.push(pet);
        }
        for _ in 0..self.bad_guy_timer.advance(dt) {
            let guy = spawn_bad_guy(&self.state.field, &mut self.rng);
            self.state.bad_guys.push(guy);
        }

        let events = tick(&mut self.state, &self.input, dt);

        let control = if self.state.phase == GamePhase::Playing {
            FrameControl::Continue
        } else {
            self.pet_timer.cancel();
            self.bad_guy_timer.cancel();
            self.last_time_ms = None;
            log::info!("round over, final score {}", self.state.score);
            FrameControl::Stop
        };

        FrameReport { control, events }
    }
}
