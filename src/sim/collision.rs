//! Player-versus-threat collision
//!
//! The whole resolver is one circle-circle test on squared distances. No
//! allocation, no state; the session skips calling it while the player's
//! invincibility window is open.

use glam::Vec2;

use crate::consts::PLAYER_RADIUS;

use super::state::{Threat, ThreatKind};

/// True when the player circle overlaps a threat circle
///
/// Strict inequality: exact tangency is not a hit.
#[inline]
pub fn hit(player_pos: Vec2, threat_pos: Vec2, kind: ThreatKind) -> bool {
    let radius_sum = PLAYER_RADIUS + kind.radius();
    player_pos.distance_squared(threat_pos) < radius_sum * radius_sum
}

/// First threat overlapping the player, if any
pub fn first_hit<'a>(player_pos: Vec2, threats: &'a [Threat]) -> Option<&'a Threat> {
    threats
        .iter()
        .find(|t| hit(player_pos, t.world_pos, t.kind))
}
