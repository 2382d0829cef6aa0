//! Core simulation value types
//!
//! Everything here is plain data: threats live in a single `Vec` owned by the
//! world, sprites and sounds are somebody else's problem.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Hostile object kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatKind {
    Asteroid,
    Missile,
}

impl ThreatKind {
    /// Collision radius for this kind (world units)
    #[inline]
    pub fn radius(self) -> f32 {
        match self {
            ThreatKind::Asteroid => ASTEROID_RADIUS,
            ThreatKind::Missile => MISSILE_RADIUS,
        }
    }
}

/// A hostile moving object the player must avoid
///
/// Created by the spawner, integrated every tick by the world, retired when it
/// drifts past the cleanup distance or lands a hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Threat {
    /// Stable identity for the presentation layer (sprite keying)
    pub id: u32,
    pub kind: ThreatKind,
    pub world_pos: Vec2,
    pub velocity: Vec2,
    /// Steers toward the player each tick instead of flying straight
    pub homing: bool,
    /// Session time at spawn (seconds)
    pub spawn_time: f32,
}

/// Difficulty knobs for one tick, recomputed from elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Threats per second
    pub spawn_rate: f32,
    /// Threat speed (world units/second)
    pub speed: f32,
    /// Probability a single spawn is a homing missile, in [0, 1]
    pub homing_chance: f32,
    /// Whether the 3-way fan pattern may trigger
    pub can_spawn_fan: bool,
}

/// Player-side session state
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerState {
    pub world_pos: Vec2,
    /// Milliseconds of hit immunity left; collision checks skip while > 0
    pub invincible_remaining: f32,
    /// Milliseconds of time dilation left
    pub slow_mo_remaining: f32,
    /// Heading from the last nonzero movement input (radians)
    pub facing: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            world_pos: Vec2::ZERO,
            invincible_remaining: 0.0,
            slow_mo_remaining: 0.0,
            facing: 0.0,
        }
    }
}

impl PlayerState {
    /// Tick the grace timers down, floored at zero
    pub fn decay_timers(&mut self, delta_ms: f32) {
        self.invincible_remaining = (self.invincible_remaining - delta_ms).max(0.0);
        self.slow_mo_remaining = (self.slow_mo_remaining - delta_ms).max(0.0);
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_remaining > 0.0
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Simulation advancing
    Active,
    /// Frozen under an overlay; no timers advance
    Paused,
    /// A collision ended the run; a revive may still rewind it
    Terminated,
}

/// Final result of a run, handed to the scoring collaborators exactly once
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Seconds survived
    pub survival_time: f32,
    /// Continues used during the run
    pub revive_count: u32,
}

/// Current screen dimensions, polled from the embedder every tick
///
/// Never cached: the spawn rectangle and wrap ranges derive from whatever
/// size arrives with the tick, so live resizes just work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True once the embedder has laid out a real surface
    #[inline]
    pub fn is_laid_out(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_decay_floors_at_zero() {
        let mut p = PlayerState {
            invincible_remaining: 100.0,
            slow_mo_remaining: 30.0,
            ..Default::default()
        };
        p.decay_timers(50.0);
        assert_eq!(p.invincible_remaining, 50.0);
        assert_eq!(p.slow_mo_remaining, 0.0);
        p.decay_timers(1000.0);
        assert_eq!(p.invincible_remaining, 0.0);
        assert!(!p.is_invincible());
    }

    #[test]
    fn test_kind_radii() {
        assert!(ThreatKind::Missile.radius() < ThreatKind::Asteroid.radius());
    }

    #[test]
    fn test_viewport_layout_guard() {
        assert!(!Viewport::new(0.0, 600.0).is_laid_out());
        assert!(Viewport::new(800.0, 600.0).is_laid_out());
        assert_eq!(Viewport::new(800.0, 600.0).center(), Vec2::new(400.0, 300.0));
    }
}
