//! Address resolution pipeline.
//!
//! This module is the entry point for the engine. Parsing one line of text
//! is a fixed pipeline over an immutable division table:
//!
//! ```text
//! text ──┬─ phone::extract ─────────────────────────────┐
//!        │                                              │
//!        ├─ score::rank ×3  (score.rs)                  │
//!        │    province / city / county candidates       │
//!        │              │                               │
//!        │              v                               │
//!        │        reduce::reduce  (reduce.rs)           │
//!        │    top-down constraints + bottom-up          │
//!        │    back-fill -> Resolution                   │
//!        │              │                               │
//!        │              v                               │
//!        │        anchor_name ── detail::extract ───────┤
//!        │                                              │
//!        └─ name::extract ─────────────────────────────┬┘
//!                                                      v
//!                                                  Outcome
//! ```
//!
//! ## Responsibilities by module
//!
//! - `score.rs`: the replaceable match strategy and per-level ranking.
//! - `reduce.rs`: commits one consistent (province, city, county) triple
//!   and picks the anchor name.
//! - `detail.rs` / `name.rs` / `phone.rs`: the three free-text extractors.
//! - `metrics.rs`: opt-in timings and candidate snapshots for the verbose
//!   path.
//!
//! Every stage is a pure function of (table, text); no stage can fail, and
//! unresolved fields stay absent. The public surface lives in `src/api.rs`.

#[path = "engine/detail.rs"]
mod detail;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/name.rs"]
mod name;
#[path = "engine/phone.rs"]
mod phone;
#[path = "engine/reduce.rs"]
mod reduce;
#[path = "engine/score.rs"]
pub(crate) mod score;

pub use metrics::{Outcome, RunMetrics, RunResult};
pub use reduce::Resolution;
pub use score::ScoreFn;

use crate::divisions::Divisions;
use log::debug;
use std::time::Instant;

/// Runs the pipeline against one division table.
///
/// Cheap to construct; borrows the table and carries the match strategy.
pub struct Engine<'a> {
    divisions: &'a Divisions,
    score: ScoreFn,
}

impl<'a> Engine<'a> {
    pub fn new(divisions: &'a Divisions) -> Self {
        Self { divisions, score: score::substring_score }
    }

    /// Substitute the match strategy (see [`ScoreFn`]).
    pub fn with_score(divisions: &'a Divisions, score: ScoreFn) -> Self {
        Self { divisions, score }
    }

    /// Run the pipeline, discarding candidates and timings.
    pub fn run(&self, text: &str) -> Outcome {
        self.run_with_metrics(text).outcome
    }

    /// Run the pipeline keeping the ranked candidate lists and per-phase
    /// timings for inspection.
    pub fn run_with_metrics(&self, text: &str) -> RunResult {
        let started = Instant::now();
        let divisions = self.divisions;

        let phone = phone::extract(text);

        let scoring = Instant::now();
        let provinces = score::rank(text, divisions, divisions.provinces(), self.score);
        let cities = score::rank(text, divisions, divisions.cities(), self.score);
        let counties = score::rank(text, divisions, divisions.counties(), self.score);
        let score_elapsed = scoring.elapsed();
        debug!(
            "ranked candidates: {} province, {} city, {} county",
            provinces.len(),
            cities.len(),
            counties.len()
        );

        let reducing = Instant::now();
        let province = provinces.first().map(|c| c.id);
        let resolution = reduce::reduce(divisions, province, &cities, &counties);
        let anchor = reduce::anchor_name(divisions, &resolution).to_string();
        let reduce_elapsed = reducing.elapsed();
        debug!("resolved anchor {:?}", anchor);

        let extracting = Instant::now();
        let detail = detail::extract(text, &anchor);
        let receiving_name = name::extract(text);
        let extract_elapsed = extracting.elapsed();

        RunResult {
            outcome: Outcome { resolution, anchor, detail, phone, receiving_name },
            provinces,
            cities,
            counties,
            metrics: RunMetrics {
                total: started.elapsed(),
                score: score_elapsed,
                reduce: reduce_elapsed,
                extract: extract_elapsed,
            },
        }
    }
}
