//! World simulation: threat motion, culling, camera transform, parallax
//!
//! The world is simulated in unbounded world space while the player is drawn
//! pinned to screen center; everything else is placed through the camera
//! offset. Background layers use partial parallax and wrap their stored
//! coordinates around the player so the field looks infinite without the
//! coordinates growing without bound.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::normalize_or_east;

use super::state::{DifficultyParams, PlayerState, Threat, ThreatKind, Viewport};

/// Background planet flavors (presentation picks the texture)
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlanetKind {
    Ice,
    Lava,
    Moon,
}

/// A star or planet on a partial-parallax layer
#[derive(Debug, Clone, Copy)]
pub struct BackgroundObject {
    pub world_pos: Vec2,
    /// Parallax depth in (0, 1); smaller reads as farther away
    pub depth: f32,
    /// Render scale hint (big stars draw at 2x)
    pub scale: f32,
    pub planet: Option<PlanetKind>,
}

/// Steer a velocity toward a desired direction with a fixed blend, keeping
/// the given speed. Pure: curved pursuit comes from calling this every tick.
pub fn steer(velocity: Vec2, desired_dir: Vec2, turn_rate: f32, speed: f32) -> Vec2 {
    let current_dir = normalize_or_east(velocity);
    let blended = current_dir.lerp(desired_dir, turn_rate);
    normalize_or_east(blended) * speed
}

/// The live world: player, threats, camera, background layers
#[derive(Debug, Clone)]
pub struct World {
    player: PlayerState,
    threats: Vec<Threat>,
    camera_offset: Vec2,
    stars: Vec<BackgroundObject>,
    planets: Vec<BackgroundObject>,
    next_id: u32,
}

impl World {
    /// A populated world with seeded star/planet fields
    pub fn new(rng: &mut Pcg32) -> Self {
        let mut world = Self::empty();

        for _ in 0..STAR_COUNT {
            let big = rng.random::<f32>() < 0.3;
            world.stars.push(BackgroundObject {
                world_pos: Vec2::new(
                    rng.random_range(-STAR_SEED_RANGE..STAR_SEED_RANGE),
                    rng.random_range(-STAR_SEED_RANGE..STAR_SEED_RANGE),
                ),
                depth: rng.random_range(0.2..0.4),
                scale: if big { 2.0 } else { 1.0 },
                planet: None,
            });
        }

        for _ in 0..PLANET_COUNT {
            let planet = match rng.random_range(0..3) {
                0 => PlanetKind::Ice,
                1 => PlanetKind::Lava,
                _ => PlanetKind::Moon,
            };
            world.planets.push(BackgroundObject {
                world_pos: Vec2::new(
                    rng.random_range(-PLANET_SEED_RANGE..PLANET_SEED_RANGE),
                    rng.random_range(-PLANET_SEED_RANGE..PLANET_SEED_RANGE),
                ),
                depth: rng.random_range(0.05..0.1),
                scale: 1.0,
                planet: Some(planet),
            });
        }

        world
    }

    /// A bare world with no background field (tests)
    pub fn empty() -> Self {
        Self {
            player: PlayerState::default(),
            threats: Vec::new(),
            camera_offset: Vec2::ZERO,
            stars: Vec::new(),
            planets: Vec::new(),
            next_id: 1,
        }
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    #[inline]
    pub fn player_pos(&self) -> Vec2 {
        self.player.world_pos
    }

    pub fn set_player_pos(&mut self, pos: Vec2) {
        self.player.world_pos = pos;
    }

    pub fn threats(&self) -> &[Threat] {
        &self.threats
    }

    pub fn stars(&self) -> &[BackgroundObject] {
        &self.stars
    }

    pub fn planets(&self) -> &[BackgroundObject] {
        &self.planets
    }

    /// Current camera offset (screen center minus player world position)
    #[inline]
    pub fn camera_offset(&self) -> Vec2 {
        self.camera_offset
    }

    /// Append a spawned threat to the live collection
    pub fn push_threat(
        &mut self,
        kind: ThreatKind,
        world_pos: Vec2,
        velocity: Vec2,
        homing: bool,
        spawn_time: f32,
    ) {
        let id = self.next_id;
        self.next_id += 1;
        log::trace!("spawn #{id}: {kind:?} at {world_pos} homing={homing}");
        self.threats.push(Threat {
            id,
            kind,
            world_pos,
            velocity,
            homing,
            spawn_time,
        });
    }

    /// Advance every threat by `dt_secs`
    ///
    /// Homing threats blend their heading toward the player; straight threats
    /// keep their heading but take the current difficulty speed, so a global
    /// ramp (or slow-mo) reaches threats already in flight.
    pub fn update_threats(&mut self, dt_secs: f32, params: &DifficultyParams) {
        let player = self.player.world_pos;
        for threat in &mut self.threats {
            if threat.homing {
                let desired = normalize_or_east(player - threat.world_pos);
                threat.velocity = steer(threat.velocity, desired, HOMING_TURN_RATE, params.speed);
            } else {
                threat.velocity = normalize_or_east(threat.velocity) * params.speed;
            }
            threat.world_pos += threat.velocity * dt_secs;
        }
    }

    /// Retire threats beyond the cleanup distance; returns how many left
    pub fn cull_distant(&mut self) -> usize {
        let player = self.player.world_pos;
        let before = self.threats.len();
        let limit_sq = CLEANUP_DISTANCE * CLEANUP_DISTANCE;
        self.threats
            .retain(|t| t.world_pos.distance_squared(player) <= limit_sq);
        before - self.threats.len()
    }

    /// Remove threats within `radius` of the player (revive safety bubble)
    pub fn clear_near_player(&mut self, radius: f32) -> usize {
        let player = self.player.world_pos;
        let before = self.threats.len();
        let radius_sq = radius * radius;
        self.threats
            .retain(|t| t.world_pos.distance_squared(player) >= radius_sq);
        before - self.threats.len()
    }

    /// Consume the threat that landed a hit (by identity)
    pub fn remove_threat(&mut self, id: u32) {
        self.threats.retain(|t| t.id != id);
    }

    /// Recompute the camera offset for this tick's viewport
    pub fn update_camera(&mut self, viewport: Viewport) {
        self.camera_offset = viewport.center() - self.player.world_pos;
    }

    /// Screen position of a full-parallax (depth 1) world point
    #[inline]
    pub fn to_screen(&self, world_pos: Vec2) -> Vec2 {
        world_pos + self.camera_offset
    }

    /// Screen position of a background object on its parallax layer
    #[inline]
    pub fn background_to_screen(&self, obj: &BackgroundObject) -> Vec2 {
        obj.world_pos + self.camera_offset * obj.depth
    }

    /// Wrap background coordinates around the player so the field never runs
    /// out. An object more than half the wrap range away on an axis shifts by
    /// the full range on that axis; the shift lands it off-screen on the
    /// opposite side, so nothing visibly jumps.
    pub fn wrap_background(&mut self, viewport: Viewport) {
        if !viewport.is_laid_out() {
            return;
        }
        let range = Vec2::new(viewport.width, viewport.height) * WRAP_FACTOR;
        let player = self.player.world_pos;

        for obj in self.stars.iter_mut().chain(self.planets.iter_mut()) {
            let off = obj.world_pos - player;
            if off.x < -range.x / 2.0 {
                obj.world_pos.x += range.x;
            } else if off.x > range.x / 2.0 {
                obj.world_pos.x -= range.x;
            }
            if off.y < -range.y / 2.0 {
                obj.world_pos.y += range.y;
            } else if off.y > range.y / 2.0 {
                obj.world_pos.y -= range.y;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(speed: f32) -> DifficultyParams {
        DifficultyParams {
            spawn_rate: 2.0,
            speed,
            homing_chance: 0.0,
            can_spawn_fan: false,
        }
    }

    #[test]
    fn test_straight_threat_keeps_heading_under_speed_ramp() {
        let mut world = World::empty();
        world.push_threat(
            ThreatKind::Asteroid,
            Vec2::new(100.0, 100.0),
            Vec2::new(-30.0, -40.0), // heading (-0.6, -0.8), speed 50
            false,
            0.0,
        );

        world.update_threats(0.0, &params(500.0));
        let t = &world.threats()[0];
        let dir = t.velocity.normalize();
        assert!((dir - Vec2::new(-0.6, -0.8)).length() < 1e-5);
        assert!((t.velocity.length() - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_homing_threat_curves_toward_player() {
        let mut world = World::empty();
        // Player at origin, missile to the right flying straight up
        world.push_threat(
            ThreatKind::Missile,
            Vec2::new(500.0, 0.0),
            Vec2::new(0.0, 100.0),
            true,
            0.0,
        );

        let before = (world.player_pos() - world.threats()[0].world_pos).normalize();
        let dot_before = world.threats()[0].velocity.normalize().dot(before);

        world.update_threats(1.0 / 60.0, &params(100.0));

        let t = &world.threats()[0];
        let to_player = (world.player_pos() - t.world_pos).normalize();
        let dot_after = t.velocity.normalize().dot(to_player);
        // Better aligned than before, but not an instant snap
        assert!(dot_after > dot_before);
        assert!(dot_after < 0.9999);
        assert!((t.velocity.length() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_steer_is_pure_and_renormalized() {
        let v = steer(Vec2::new(100.0, 0.0), Vec2::new(0.0, 1.0), 0.1, 250.0);
        assert!((v.length() - 250.0).abs() < 1e-3);
        // Blend leans toward the desired direction
        assert!(v.y > 0.0);
        assert!(v.x > v.y);
    }

    #[test]
    fn test_cull_bounds_every_survivor() {
        let mut world = World::empty();
        world.push_threat(ThreatKind::Asteroid, Vec2::new(1999.0, 0.0), Vec2::X, false, 0.0);
        world.push_threat(ThreatKind::Asteroid, Vec2::new(2001.0, 0.0), Vec2::X, false, 0.0);
        world.push_threat(ThreatKind::Missile, Vec2::new(0.0, -3000.0), Vec2::X, false, 0.0);

        let retired = world.cull_distant();
        assert_eq!(retired, 2);
        for t in world.threats() {
            assert!(t.world_pos.distance(world.player_pos()) <= CLEANUP_DISTANCE);
        }
    }

    #[test]
    fn test_camera_offset_centers_player() {
        let mut world = World::empty();
        world.set_player_pos(Vec2::new(250.0, -40.0));
        world.update_camera(Viewport::new(800.0, 600.0));

        assert_eq!(world.camera_offset(), Vec2::new(150.0, 340.0));
        // The player's own world position maps to screen center
        assert_eq!(world.to_screen(world.player_pos()), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_background_parallax_depth() {
        let mut world = World::empty();
        world.set_player_pos(Vec2::new(100.0, 0.0));
        world.update_camera(Viewport::new(800.0, 600.0));

        let obj = BackgroundObject {
            world_pos: Vec2::ZERO,
            depth: 0.5,
            scale: 1.0,
            planet: None,
        };
        // offset = (300, 300); screen = 0 + offset * 0.5
        assert_eq!(world.background_to_screen(&obj), Vec2::new(150.0, 150.0));
    }

    #[test]
    fn test_background_wrap_shifts_by_exactly_one_range() {
        let vp = Viewport::new(800.0, 600.0);
        let range_x = vp.width * WRAP_FACTOR; // 2000
        let mut world = World::empty();
        world.stars.push(BackgroundObject {
            world_pos: Vec2::new(-(range_x / 2.0) - 10.0, 0.0),
            depth: 0.3,
            scale: 1.0,
            planet: None,
        });
        world.update_camera(vp);

        let before = world.stars[0].world_pos;
        let screen_before = world.background_to_screen(&world.stars[0]);
        world.wrap_background(vp);
        let after = world.stars[0].world_pos;
        let screen_after = world.background_to_screen(&world.stars[0]);

        assert_eq!(after.x - before.x, range_x);
        assert_eq!(after.y, before.y);
        // Off-screen before the wrap, off-screen after: no visible jump
        assert!(screen_before.x < 0.0 || screen_before.x > vp.width);
        assert!(screen_after.x < 0.0 || screen_after.x > vp.width);
    }

    #[test]
    fn test_clear_near_player_empties_safety_bubble() {
        let mut world = World::empty();
        world.push_threat(ThreatKind::Asteroid, Vec2::new(100.0, 0.0), Vec2::X, false, 0.0);
        world.push_threat(ThreatKind::Missile, Vec2::new(0.0, 399.0), Vec2::X, false, 0.0);
        world.push_threat(ThreatKind::Asteroid, Vec2::new(500.0, 0.0), Vec2::X, false, 0.0);

        let cleared = world.clear_near_player(SAFE_CLEAR_RADIUS);
        assert_eq!(cleared, 2);
        for t in world.threats() {
            assert!(t.world_pos.distance(world.player_pos()) >= SAFE_CLEAR_RADIUS);
        }
    }
}
