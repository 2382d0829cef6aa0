//! Session orchestration and the revive/continue state machine
//!
//! One `tick` per rendered frame: decay grace timers, apply the difficulty
//! curve, drive the spawner and the world, resolve collisions, and hand back
//! an outcome on the tick the run ends. Everything in here is synchronous;
//! the only asynchronous thing in the whole game — the revive confirmation —
//! arrives as a plain `revive()` call while the session sits frozen in
//! `Terminated`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

use super::collision;
use super::difficulty::DifficultyTable;
use super::snapshot::{self, RenderSnapshot};
use super::spawner::Spawner;
use super::state::{SessionOutcome, SessionPhase, Viewport};
use super::world::World;

/// Input for a single tick
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Desired movement direction, magnitude <= 1 (clamped if not)
    pub move_dir: Vec2,
    /// Current screen size from the embedder
    pub viewport: Viewport,
    /// Pause toggle (overlay opened/closed)
    pub toggle_pause: bool,
}

impl TickInput {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            move_dir: Vec2::ZERO,
            viewport,
            toggle_pause: false,
        }
    }
}

/// A survival run from first tick to final outcome
#[derive(Debug, Clone)]
pub struct Session {
    phase: SessionPhase,
    world: World,
    spawner: Spawner,
    difficulty: DifficultyTable,
    rng: Pcg32,
    seed: u64,
    /// Seconds survived so far
    time_alive: f32,
    revive_count: u32,
    outcome: Option<SessionOutcome>,
}

impl Session {
    /// New session with the tuned difficulty table
    pub fn new(seed: u64) -> Self {
        Self::with_table(seed, DifficultyTable::default())
    }

    /// New session with a caller-supplied table (tests, balance experiments)
    pub fn with_table(seed: u64, difficulty: DifficultyTable) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::new(&mut rng);
        Self {
            phase: SessionPhase::Active,
            world,
            spawner: Spawner::new(),
            difficulty,
            rng,
            seed,
            time_alive: 0.0,
            revive_count: 0,
            outcome: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.time_alive
    }

    pub fn revive_count(&self) -> u32 {
        self.revive_count
    }

    /// The recorded outcome while `Terminated`
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    /// Advance one frame
    ///
    /// Returns `Some(outcome)` exactly on the tick a collision ends the run;
    /// the caller forwards it to the scoring collaborators.
    pub fn tick(&mut self, input: &TickInput, delta_ms: f32) -> Option<SessionOutcome> {
        // Overlay pause: freeze everything, timers included
        if input.toggle_pause {
            match self.phase {
                SessionPhase::Active => {
                    self.phase = SessionPhase::Paused;
                    log::debug!("session paused at {:.1}s", self.time_alive);
                }
                SessionPhase::Paused => self.phase = SessionPhase::Active,
                SessionPhase::Terminated => {}
            }
        }
        if self.phase != SessionPhase::Active {
            return None;
        }

        let delta_secs = delta_ms / 1000.0;
        self.time_alive += delta_secs;

        // Grace timers run down, floored at zero
        self.world.player_mut().decay_timers(delta_ms);

        // Movement: unit-clamped direction at fixed player speed
        let dir = input.move_dir.clamp_length_max(1.0);
        if dir.length_squared() > 0.0 {
            let player = self.world.player_mut();
            player.world_pos += dir * PLAYER_SPEED * delta_secs;
            player.facing = dir.y.atan2(dir.x);
        }

        // Camera follows the player before anything is placed this tick
        self.world.update_camera(input.viewport);

        // Difficulty for this tick; slow-mo dilates threat speed only
        let mut params = self.difficulty.params(self.time_alive);
        if self.world.player().slow_mo_remaining > 0.0 {
            params.speed *= SLOW_MO_FACTOR;
        }

        self.spawner.tick(
            delta_ms,
            &params,
            input.viewport,
            self.time_alive,
            &mut self.rng,
            &mut self.world,
        );

        self.world.update_threats(delta_secs, &params);
        let retired = self.world.cull_distant();
        if retired > 0 {
            log::trace!("retired {retired} distant threats");
        }

        // Collision resolves only outside the invincibility window
        if !self.world.player().is_invincible() {
            if let Some(threat) = collision::first_hit(self.world.player_pos(), self.world.threats())
            {
                let id = threat.id;
                self.world.remove_threat(id);
                return Some(self.terminate());
            }
        }

        self.world.wrap_background(input.viewport);
        None
    }

    fn terminate(&mut self) -> SessionOutcome {
        let outcome = SessionOutcome {
            survival_time: self.time_alive,
            revive_count: self.revive_count,
        };
        self.phase = SessionPhase::Terminated;
        self.outcome = Some(outcome);
        log::info!(
            "run over: {:.1}s survived, {} revive(s)",
            outcome.survival_time,
            outcome.revive_count
        );
        outcome
    }

    /// Whether a revive offer is still on the table (one continue per run)
    pub fn can_revive(&self) -> bool {
        self.phase == SessionPhase::Terminated && self.revive_count == 0
    }

    /// Confirmed revive: grace windows, safety bubble, back to `Active`
    ///
    /// Declining is simply never calling this; the session stays
    /// `Terminated` and the recorded outcome stands.
    pub fn revive(&mut self) -> bool {
        if !self.can_revive() {
            return false;
        }
        let cleared = self.world.clear_near_player(SAFE_CLEAR_RADIUS);
        {
            let player = self.world.player_mut();
            player.invincible_remaining = INVINCIBLE_MS;
            player.slow_mo_remaining = SLOW_MO_MS;
        }
        self.revive_count += 1;
        self.outcome = None;
        self.phase = SessionPhase::Active;
        log::info!("revived: cleared {cleared} nearby threats");
        true
    }

    /// Discard everything and start a fresh run
    pub fn restart(&mut self, seed: u64) {
        let difficulty = self.difficulty.clone();
        *self = Session::with_table(seed, difficulty);
        log::debug!("session restarted with seed {seed}");
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Flatten the current state for the presentation layer
    pub fn snapshot(&self) -> RenderSnapshot {
        snapshot::capture(&self.world, self.phase, self.time_alive)
    }
}
