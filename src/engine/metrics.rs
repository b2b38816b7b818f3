//! Engine run metrics.
//!
//! Opt-in observability for a parse run: per-phase timings plus the ranked
//! candidate lists the reduction worked from. The plain [`Engine::run`]
//! path discards these; [`Engine::run_with_metrics`] keeps them for the
//! verbose API and the CLI report.
//!
//! [`Engine::run`]: super::Engine::run
//! [`Engine::run_with_metrics`]: super::Engine::run_with_metrics

use super::reduce::Resolution;
use super::score::Candidate;
use std::time::Duration;

/// Timings for one run.
#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time.
    pub total: Duration,
    /// Time spent scoring all three levels.
    pub score: Duration,
    /// Time spent in reduction and back-fill.
    pub reduce: Duration,
    /// Time spent extracting detail, name and phone.
    pub extract: Duration,
}

/// Everything a run produced, before conversion to the public record.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub resolution: Resolution,
    pub anchor: String,
    pub detail: Option<String>,
    pub phone: String,
    pub receiving_name: Option<String>,
}

/// [`Outcome`] bundled with the candidate lists and timings.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub outcome: Outcome,
    pub provinces: Vec<Candidate>,
    pub cities: Vec<Candidate>,
    pub counties: Vec<Candidate>,
    pub metrics: RunMetrics,
}
