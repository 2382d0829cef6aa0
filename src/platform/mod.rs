//! Collaborator boundaries
//!
//! The core never talks to storage backends or leaderboard services
//! directly; it hands a finalized [`SessionOutcome`] across these narrow
//! traits. The web build plugs in localStorage and a remote ranking service
//! here; tests and the headless demo use the in-process implementations.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::highscores::BestScore;
use crate::sim::SessionOutcome;

/// Best-score persistence: fire-and-forget write, synchronous best read
pub trait ScoreStore {
    /// Record an outcome; returns true when it is a new best
    fn submit(&mut self, outcome: &SessionOutcome) -> bool;
    /// Current best (0.0 when no run recorded)
    fn best(&self) -> BestScore;
}

/// Remote ranking: fire-and-forget, the core never waits on a result
pub trait RankingSink {
    fn submit(&mut self, outcome: &SessionOutcome);
}

/// Hand a terminal outcome to both collaborators; returns the new-best flag
pub fn report_outcome(
    outcome: &SessionOutcome,
    store: &mut dyn ScoreStore,
    ranking: &mut dyn RankingSink,
) -> bool {
    let new_best = store.submit(outcome);
    ranking.submit(outcome);
    new_best
}

/// In-process score store (tests, demo)
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    best: BestScore,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn submit(&mut self, outcome: &SessionOutcome) -> bool {
        self.best.submit(outcome)
    }

    fn best(&self) -> BestScore {
        self.best
    }
}

/// JSON-file-backed score store for native builds
#[derive(Debug)]
pub struct JsonScoreStore {
    path: PathBuf,
    best: BestScore,
}

impl JsonScoreStore {
    /// Load the record at `path`; a missing file is an empty record
    pub fn load(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let best = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BestScore::new(),
            Err(e) => return Err(e),
        };
        Ok(Self { path, best })
    }
}

impl ScoreStore for JsonScoreStore {
    fn submit(&mut self, outcome: &SessionOutcome) -> bool {
        let new_best = self.best.submit(outcome);
        if new_best {
            // Fire-and-forget per the contract: a failed write costs the
            // record, never the session
            match serde_json::to_string(&self.best) {
                Ok(json) => {
                    if let Err(e) = fs::write(&self.path, json) {
                        log::warn!("best-score write failed: {e}");
                    }
                }
                Err(e) => log::warn!("best-score encode failed: {e}"),
            }
        }
        new_best
    }

    fn best(&self) -> BestScore {
        self.best
    }
}

/// Ranking sink that only logs (demo stand-in for the remote service)
#[derive(Debug, Default)]
pub struct LogRankingSink;

impl RankingSink for LogRankingSink {
    fn submit(&mut self, outcome: &SessionOutcome) {
        log::info!(
            "ranking submit: {:.1}s ({} revives)",
            outcome.survival_time,
            outcome.revive_count
        );
    }
}
