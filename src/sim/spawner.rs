//! Threat spawn director
//!
//! Owns the spawn-interval accumulator and decides where the next threat
//! enters the world. Singles land on the perimeter of a rectangle sized to
//! the viewport plus a margin, so they appear just off-screen in every
//! direction including the corners. Fans land on a ring and converge.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::normalize_or_east;

use super::state::{DifficultyParams, ThreatKind, Viewport};
use super::world::World;

/// Spawn-interval accumulator (milliseconds)
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    timer: f32,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate elapsed time and emit at most one spawn unit per tick
    ///
    /// The one-unit-per-tick shape is the implicit cap on unbounded spawn
    /// rates: the effective interval floors at the frame delta.
    pub fn tick(
        &mut self,
        delta_ms: f32,
        params: &DifficultyParams,
        viewport: Viewport,
        now_secs: f32,
        rng: &mut Pcg32,
        world: &mut World,
    ) {
        // Degenerate-input guards: no interval to divide, no surface to ring
        if params.spawn_rate <= 0.0 {
            return;
        }
        if !viewport.is_laid_out() {
            log::debug!("spawner: viewport not laid out, skipping");
            return;
        }

        let interval = 1000.0 / params.spawn_rate;
        self.timer += delta_ms;
        if self.timer >= interval {
            self.timer -= interval;
            self.spawn_unit(params, viewport, now_secs, rng, world);
        }
    }

    /// One trigger: a fan when eligible and the roll succeeds, else a single
    fn spawn_unit(
        &mut self,
        params: &DifficultyParams,
        viewport: Viewport,
        now_secs: f32,
        rng: &mut Pcg32,
        world: &mut World,
    ) {
        if params.can_spawn_fan && rng.random::<f32>() < FAN_CHANCE {
            spawn_fan(params, viewport, now_secs, rng, world);
        } else {
            spawn_single(params, viewport, now_secs, rng, world);
        }
    }
}

/// Spawn one threat on the off-screen rectangle perimeter, aimed at the player
fn spawn_single(
    params: &DifficultyParams,
    viewport: Viewport,
    now_secs: f32,
    rng: &mut Pcg32,
    world: &mut World,
) {
    let w = viewport.width;
    let h = viewport.height;
    let margin = SPAWN_MARGIN;

    // Rectangle just outside the viewport; walk a uniform distance along its
    // perimeter so corners are as likely as edge midpoints.
    let rw = w + margin * 2.0;
    let rh = h + margin * 2.0;
    let perimeter = 2.0 * (rw + rh);
    let p = rng.random_range(0.0..perimeter);

    // Screen-space point, top edge first, counter-perimeter on the far sides
    let (sx, sy) = if p < rw {
        (p - margin, -margin)
    } else if p < rw + rh {
        (w + margin, (p - rw) - margin)
    } else if p < rw + rh + rw {
        ((rw + rh + rw - p) - margin, h + margin)
    } else {
        (-margin, (perimeter - p) - margin)
    };

    // The camera keeps the player at screen center, so screen -> world is a
    // shift by (player - center).
    let player = world.player_pos();
    let world_pos = player + Vec2::new(sx, sy) - viewport.center();

    // Aim exactly at the player's current position. The margin guarantees a
    // non-zero distance; the fallback only matters if that ever breaks.
    let dir = normalize_or_east(player - world_pos);

    let homing = rng.random::<f32>() < params.homing_chance;
    let (kind, velocity) = if homing {
        (ThreatKind::Missile, dir * params.speed)
    } else {
        // Magnitude-only jitter: direction stays locked on the player
        let jitter = rng.random_range(1.0 - ASTEROID_JITTER..=1.0 + ASTEROID_JITTER);
        (ThreatKind::Asteroid, dir * params.speed * jitter)
    };

    world.push_threat(kind, world_pos, velocity, homing, now_secs);
}

/// Spawn three missiles on an arc, all converging on the player
fn spawn_fan(
    params: &DifficultyParams,
    viewport: Viewport,
    now_secs: f32,
    rng: &mut Pcg32,
    world: &mut World,
) {
    let radius = viewport.width.max(viewport.height) / 2.0 + FAN_MARGIN;
    let base_angle = rng.random_range(0.0..std::f32::consts::TAU);
    let player = world.player_pos();

    for i in -1i32..=1 {
        let angle = base_angle + i as f32 * FAN_SPREAD;
        let world_pos = player + Vec2::new(angle.cos(), angle.sin()) * radius;
        let dir = normalize_or_east(player - world_pos);
        world.push_threat(
            ThreatKind::Missile,
            world_pos,
            dir * params.speed,
            false,
            now_secs,
        );
    }
}
