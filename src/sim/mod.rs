//! Deterministic survival simulation
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Frame-delta driven, single-threaded
//! - Seeded RNG only, injected at session construction
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod session;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod world;

pub use difficulty::{ChaosRamp, DifficultyTable, DifficultyTier};
pub use session::{Session, TickInput};
pub use snapshot::{BackgroundSprite, RenderSnapshot, ThreatSprite};
pub use spawner::Spawner;
pub use state::{
    DifficultyParams, PlayerState, SessionOutcome, SessionPhase, Threat, ThreatKind, Viewport,
};
pub use world::{BackgroundObject, PlanetKind, World, steer};
