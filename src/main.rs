//! Headless demo driver
//!
//! Runs a full session at a fixed 60 Hz without a renderer: a scripted pilot
//! circle-strafes until something connects, burns the one revive, and the
//! outcome lands in the local score store. Useful for eyeballing balance from
//! logs (`RUST_LOG=debug cargo run`).

use glam::Vec2;

use meteor_drift::platform::{self, JsonScoreStore, LogRankingSink, ScoreStore};
use meteor_drift::sim::{Session, SessionPhase, TickInput, Viewport};

const DELTA_MS: f32 = 1000.0 / 60.0;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xD0D6E);

    let mut store = match JsonScoreStore::load("meteor-drift-best.json") {
        Ok(store) => store,
        Err(e) => {
            eprintln!("could not load score store: {e}");
            std::process::exit(1);
        }
    };
    let mut ranking = LogRankingSink;

    let mut session = Session::new(seed);
    let viewport = Viewport::new(800.0, 600.0);
    let mut tick_count: u64 = 0;

    log::info!("starting run with seed {seed:#x}");

    loop {
        // Scripted pilot: strafe in a slow circle
        let t = tick_count as f32 * DELTA_MS / 1000.0;
        let input = TickInput {
            move_dir: Vec2::new((t * 0.8).cos(), (t * 0.8).sin()),
            viewport,
            toggle_pause: false,
        };

        if let Some(outcome) = session.tick(&input, DELTA_MS) {
            if session.can_revive() {
                // The demo always takes the continue offer
                log::info!("down at {:.1}s, reviving", outcome.survival_time);
                session.revive();
                continue;
            }
            let new_best = platform::report_outcome(&outcome, &mut store, &mut ranking);
            println!(
                "survived {:.1}s with {} revive(s){}  (best: {})",
                outcome.survival_time,
                outcome.revive_count,
                if new_best { "  NEW BEST" } else { "" },
                store.best().display(),
            );
            break;
        }

        tick_count += 1;
        if tick_count % 300 == 0 {
            let snap = session.snapshot();
            log::debug!(
                "t={:.1}s threats={} phase={:?}",
                snap.elapsed_secs,
                snap.threats.len(),
                snap.phase
            );
        }
    }

    debug_assert_eq!(session.phase(), SessionPhase::Terminated);
}
