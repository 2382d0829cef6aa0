//! Per-tick presentation snapshot
//!
//! The simulation never issues drawing commands; instead each tick it can be
//! flattened into screen-space sprite placements for whatever renderer the
//! embedder brings. Sprites are keyed by threat identity so the presentation
//! layer can pool its objects.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{SessionPhase, ThreatKind};
use super::world::{PlanetKind, World};

/// One threat, placed on screen
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThreatSprite {
    pub id: u32,
    pub kind: ThreatKind,
    pub world_pos: Vec2,
    pub screen_pos: Vec2,
    /// Missiles face their velocity; asteroids spin however the renderer likes
    pub heading: f32,
}

/// One background object, placed on its parallax layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BackgroundSprite {
    pub screen_pos: Vec2,
    pub depth: f32,
    pub scale: f32,
    pub planet: Option<PlanetKind>,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: SessionPhase,
    pub elapsed_secs: f32,
    /// Always the viewport center while the camera tracks the player
    pub player_screen_pos: Vec2,
    /// Radians; from the last nonzero movement input
    pub player_facing: f32,
    /// Blink hint in [0, 1]; 1.0 whenever the player is not invincible
    pub player_alpha: f32,
    pub invincible: bool,
    pub threats: Vec<ThreatSprite>,
    pub stars: Vec<BackgroundSprite>,
    pub planets: Vec<BackgroundSprite>,
}

/// Flatten the world into screen space using its current camera offset
pub fn capture(world: &World, phase: SessionPhase, elapsed_secs: f32) -> RenderSnapshot {
    let player = world.player();

    let player_alpha = if player.is_invincible() {
        // Blink at the original cadence: sin(t_ms / 50) mapped into [0, 1]
        ((elapsed_secs * 1000.0) / 50.0).sin() * 0.5 + 0.5
    } else {
        1.0
    };

    let threats = world
        .threats()
        .iter()
        .map(|t| ThreatSprite {
            id: t.id,
            kind: t.kind,
            world_pos: t.world_pos,
            screen_pos: world.to_screen(t.world_pos),
            heading: t.velocity.y.atan2(t.velocity.x),
        })
        .collect();

    let flatten = |objs: &[super::world::BackgroundObject]| {
        objs.iter()
            .map(|o| BackgroundSprite {
                screen_pos: world.background_to_screen(o),
                depth: o.depth,
                scale: o.scale,
                planet: o.planet,
            })
            .collect::<Vec<_>>()
    };

    RenderSnapshot {
        phase,
        elapsed_secs,
        player_screen_pos: world.to_screen(player.world_pos),
        player_facing: player.facing,
        player_alpha,
        invincible: player.is_invincible(),
        threats,
        stars: flatten(world.stars()),
        planets: flatten(world.planets()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;

    #[test]
    fn test_player_is_screen_centered() {
        let mut world = World::empty();
        world.set_player_pos(Vec2::new(1234.0, -987.0));
        world.update_camera(Viewport::new(800.0, 600.0));

        let snap = capture(&world, SessionPhase::Active, 1.0);
        assert_eq!(snap.player_screen_pos, Vec2::new(400.0, 300.0));
        assert_eq!(snap.player_alpha, 1.0);
        assert!(!snap.invincible);
    }

    #[test]
    fn test_threats_keyed_by_identity_and_camera_relative() {
        let mut world = World::empty();
        world.set_player_pos(Vec2::new(100.0, 0.0));
        world.update_camera(Viewport::new(800.0, 600.0));
        world.push_threat(
            crate::sim::ThreatKind::Missile,
            Vec2::new(200.0, 0.0),
            Vec2::new(0.0, -50.0),
            false,
            0.5,
        );

        let snap = capture(&world, SessionPhase::Active, 1.0);
        assert_eq!(snap.threats.len(), 1);
        let s = &snap.threats[0];
        assert_eq!(s.id, world.threats()[0].id);
        // world (200,0) + camera offset (300,300)
        assert_eq!(s.screen_pos, Vec2::new(500.0, 300.0));
        // heading straight up the -y axis
        assert!((s.heading + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_blink_hint_while_invincible() {
        let mut world = World::empty();
        world.player_mut().invincible_remaining = 500.0;
        let snap = capture(&world, SessionPhase::Active, 2.0);
        assert!(snap.invincible);
        assert!((0.0..=1.0).contains(&snap.player_alpha));
    }
}
