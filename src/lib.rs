//! Meteor Drift - an infinite-scroll survival game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (difficulty ramp, spawn director, world
//!   integration, collision, session state machine)
//! - `platform`: Collaborator boundaries (score persistence, remote ranking)
//! - `highscores`: Local best-score record

pub mod highscores;
pub mod platform;
pub mod sim;

pub use highscores::BestScore;
pub use sim::{Session, SessionOutcome, SessionPhase, TickInput};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Collision radii (world units)
    pub const PLAYER_RADIUS: f32 = 12.0;
    pub const ASTEROID_RADIUS: f32 = 14.0;
    pub const MISSILE_RADIUS: f32 = 10.0;

    /// Keyboard/joystick player speed (world units/second)
    pub const PLAYER_SPEED: f32 = 300.0;

    /// Revive grace windows (milliseconds)
    pub const INVINCIBLE_MS: f32 = 2000.0;
    pub const SLOW_MO_MS: f32 = 500.0;
    /// Threat speed multiplier while slow-mo is active
    pub const SLOW_MO_FACTOR: f32 = 0.7;
    /// Threats inside this radius are cleared on revive
    pub const SAFE_CLEAR_RADIUS: f32 = 400.0;

    /// Single spawns land on a rectangle this far outside the viewport
    pub const SPAWN_MARGIN: f32 = 100.0;
    /// Fan spawns land on a ring of half the larger viewport dimension plus this
    pub const FAN_MARGIN: f32 = 50.0;
    /// Probability that an eligible spawn trigger emits a fan instead of a single
    pub const FAN_CHANCE: f32 = 0.1;
    /// Angular gap between fan members (radians)
    pub const FAN_SPREAD: f32 = 0.2;
    /// Asteroid speed jitter: multiplicative, direction untouched
    pub const ASTEROID_JITTER: f32 = 0.1;

    /// Threats farther than this from the player are retired
    pub const CLEANUP_DISTANCE: f32 = 2000.0;
    /// Homing steer: per-tick blend toward the player direction
    pub const HOMING_TURN_RATE: f32 = 0.1;

    /// Background field sizes
    pub const STAR_COUNT: usize = 80;
    pub const PLANET_COUNT: usize = 4;
    /// Initial scatter half-ranges (world units)
    pub const STAR_SEED_RANGE: f32 = 1500.0;
    pub const PLANET_SEED_RANGE: f32 = 4000.0;
    /// Background wrap range = viewport dimension times this, per axis
    pub const WRAP_FACTOR: f32 = 2.5;
}

/// Normalize a vector, falling back to `+x` when it is too short to carry a
/// direction. Keeps NaN out of spawn/homing math (degenerate-input guard).
#[inline]
pub fn normalize_or_east(v: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(Vec2::X)
}
