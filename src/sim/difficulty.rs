//! Difficulty ramp: elapsed survival time in, spawn knobs out
//!
//! Pure and total: any finite input produces params, negative time clamps to
//! the opening tier. The numbers live in a serde-loadable table so balance
//! passes are data edits, not code edits. The default table must keep
//! `spawn_rate` and `speed` non-decreasing over time; `params` never
//! reorders anything on its own.

use serde::{Deserialize, Serialize};

use super::state::DifficultyParams;

/// A fixed-rate band of the ramp, active while `elapsed < until_secs`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DifficultyTier {
    pub until_secs: f32,
    pub spawn_rate: f32,
    pub speed: f32,
}

/// The open-ended tail after the last tier: linear growth, capped speed
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChaosRamp {
    pub start_secs: f32,
    pub base_spawn_rate: f32,
    pub spawn_rate_per_sec: f32,
    pub base_speed: f32,
    pub speed_per_sec: f32,
    pub max_speed: f32,
}

/// Complete difficulty configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub tiers: Vec<DifficultyTier>,
    pub ramp: ChaosRamp,
    /// Fan spawns become eligible at this time
    pub fan_threshold_secs: f32,
    /// Homing chance ramps linearly from this time...
    pub homing_start_secs: f32,
    pub homing_chance_per_sec: f32,
    /// ...up to this cap
    pub homing_chance_cap: f32,
}

impl Default for DifficultyTable {
    /// The tuned table: dense-but-slow opening, stepped ramp, capped chaos
    fn default() -> Self {
        Self {
            tiers: vec![
                // Learning to dodge
                DifficultyTier { until_secs: 10.0, spawn_rate: 2.5, speed: 200.0 },
                // More meteors, slightly faster
                DifficultyTier { until_secs: 20.0, spawn_rate: 4.0, speed: 250.0 },
                // Speed ramp
                DifficultyTier { until_secs: 30.0, spawn_rate: 6.0, speed: 350.0 },
            ],
            ramp: ChaosRamp {
                start_secs: 30.0,
                base_spawn_rate: 8.0,
                spawn_rate_per_sec: 0.2,
                base_speed: 600.0,
                speed_per_sec: 5.0,
                max_speed: 800.0,
            },
            fan_threshold_secs: 20.0,
            homing_start_secs: 30.0,
            homing_chance_per_sec: 0.01,
            homing_chance_cap: 0.25,
        }
    }
}

impl DifficultyTable {
    /// Difficulty knobs at `elapsed_secs` into the run
    pub fn params(&self, elapsed_secs: f32) -> DifficultyParams {
        let t = elapsed_secs.max(0.0);

        let (spawn_rate, speed) = match self.tiers.iter().find(|tier| t < tier.until_secs) {
            Some(tier) => (tier.spawn_rate, tier.speed),
            None => {
                let over = t - self.ramp.start_secs;
                (
                    self.ramp.base_spawn_rate + over * self.ramp.spawn_rate_per_sec,
                    (self.ramp.base_speed + over * self.ramp.speed_per_sec)
                        .min(self.ramp.max_speed),
                )
            }
        };

        let homing_chance = ((t - self.homing_start_secs) * self.homing_chance_per_sec)
            .clamp(0.0, self.homing_chance_cap);

        DifficultyParams {
            spawn_rate,
            speed,
            homing_chance,
            can_spawn_fan: t >= self.fan_threshold_secs,
        }
    }

    /// The hard speed ceiling of this table
    pub fn max_speed(&self) -> f32 {
        self.ramp.max_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_opening_tier() {
        let table = DifficultyTable::default();
        let p = table.params(0.0);
        assert_eq!(p.spawn_rate, 2.5);
        assert_eq!(p.speed, 200.0);
        assert_eq!(p.homing_chance, 0.0);
        assert!(!p.can_spawn_fan);
    }

    #[test]
    fn test_negative_time_clamps_to_opening_tier() {
        let table = DifficultyTable::default();
        assert_eq!(table.params(-5.0), table.params(0.0));
    }

    #[test]
    fn test_tier_boundaries() {
        let table = DifficultyTable::default();
        assert_eq!(table.params(9.99).spawn_rate, 2.5);
        assert_eq!(table.params(10.0).spawn_rate, 4.0);
        assert_eq!(table.params(20.0).speed, 350.0);
        assert_eq!(table.params(30.0).spawn_rate, 8.0);
        assert_eq!(table.params(30.0).speed, 600.0);
    }

    #[test]
    fn test_fan_eligibility_threshold() {
        let table = DifficultyTable::default();
        assert!(!table.params(19.9).can_spawn_fan);
        assert!(table.params(20.0).can_spawn_fan);
        assert!(table.params(500.0).can_spawn_fan);
    }

    #[test]
    fn test_speed_caps_in_chaos() {
        let table = DifficultyTable::default();
        // 600 + 5/s hits the 800 cap at t = 70
        assert_eq!(table.params(70.0).speed, 800.0);
        assert_eq!(table.params(10_000.0).speed, table.max_speed());
        // spawn rate keeps growing unbounded
        assert!(table.params(10_000.0).spawn_rate > table.params(70.0).spawn_rate);
    }

    #[test]
    fn test_homing_chance_ramp() {
        let table = DifficultyTable::default();
        assert_eq!(table.params(29.0).homing_chance, 0.0);
        let p = table.params(40.0);
        assert!((p.homing_chance - 0.1).abs() < 1e-6);
        assert_eq!(table.params(1000.0).homing_chance, 0.25);
    }

    proptest! {
        /// spawn_rate and speed never decrease with time; speed never exceeds the cap
        #[test]
        fn prop_monotonic_and_capped(t1 in 0.0f32..600.0, dt in 0.0f32..600.0) {
            let table = DifficultyTable::default();
            let a = table.params(t1);
            let b = table.params(t1 + dt);
            prop_assert!(b.spawn_rate >= a.spawn_rate);
            prop_assert!(b.speed >= a.speed);
            prop_assert!(b.speed <= table.max_speed());
            prop_assert!((0.0..=1.0).contains(&b.homing_chance));
        }
    }
}
