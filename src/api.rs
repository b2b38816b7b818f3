use crate::divisions::Divisions;
use crate::engine::{Engine, Outcome, ScoreFn};
use serde::Serialize;
use std::time::Duration;

/// A parsed shipping address.
///
/// Every field is independently optional; absence of a match is a valid
/// state, never an error. `phone` defaults to the empty string instead of
/// `None`, matching what downstream order systems expect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Province-level division name, e.g. "广东省".
    pub province: Option<String>,
    /// City-level division name. For a municipality this is the data's
    /// placeholder city (市辖区), whose districts sit one level deeper.
    pub city: Option<String>,
    /// County-level division name, e.g. "宝安区".
    pub county: Option<String>,
    /// Free-form detail following the most specific resolved division.
    pub detail: Option<String>,
    /// Last mobile number in the text, or empty.
    pub phone: String,
    /// Most name-like token of the text.
    pub receiving_name: Option<String>,
}

/// One scored division candidate, as seen by the reduction.
#[derive(Debug, Clone)]
pub struct CandidateSummary {
    pub name: String,
    pub code: String,
    pub score: u32,
}

/// Extra details returned by [`parse_verbose_with`].
///
/// Compact on purpose: the ranked candidate lists, the committed triple's
/// anchor, and per-phase timings. Enough to see why a text resolved the
/// way it did without dumping engine internals.
#[derive(Debug, Clone)]
pub struct ParseDetails {
    /// Time spent scoring all three levels.
    pub score: Duration,
    /// Time spent in reduction and back-fill.
    pub reduce: Duration,
    /// Time spent on detail/name/phone extraction.
    pub extract: Duration,
    /// Ranked province candidates (only the first is ever committed).
    pub provinces: Vec<CandidateSummary>,
    /// Ranked city candidates.
    pub cities: Vec<CandidateSummary>,
    /// Ranked county candidates.
    pub counties: Vec<CandidateSummary>,
    /// Anchor name used for detail extraction; empty when nothing resolved.
    pub anchor: String,
}

/// Result from [`parse_verbose_with`].
#[derive(Debug, Clone)]
pub struct ParseReport {
    pub text: String,
    pub address: Address,
    /// Total elapsed time for the run.
    pub elapsed: Duration,
    pub details: ParseDetails,
}

/// Parse `text` against the bundled division table.
///
/// The bundled table is materialized on first use and shared by every call.
///
/// # Example
/// ```
/// use kuaidi::parse;
///
/// let out = parse("深圳市宝安区盘山路28号幸福茶庄,张三，13956232345");
/// assert_eq!(out.province.as_deref(), Some("广东省"));
/// assert_eq!(out.county.as_deref(), Some("宝安区"));
/// assert_eq!(out.phone, "13956232345");
/// ```
pub fn parse(text: &str) -> Address {
    parse_with(text, Divisions::bundled())
}

/// Parse `text` against an injected division table.
///
/// Use this to supply a complete national table (or a synthetic one in
/// tests) instead of the bundled snapshot.
pub fn parse_with(text: &str, divisions: &Divisions) -> Address {
    let engine = Engine::new(divisions);
    to_address(divisions, engine.run(text))
}

/// Parse `text` with a custom match strategy in place of the default
/// two-tier substring scoring.
pub fn parse_with_score(text: &str, divisions: &Divisions, score: ScoreFn) -> Address {
    let engine = Engine::with_score(divisions, score);
    to_address(divisions, engine.run(text))
}

/// Parse `text` and keep the ranked candidates and per-phase timings.
///
/// This is the debugging entry point; the plain [`parse_with`] path does
/// not surface these.
pub fn parse_verbose_with(text: &str, divisions: &Divisions) -> ParseReport {
    let engine = Engine::new(divisions);
    let run = engine.run_with_metrics(text);

    let summarize = |candidates: &[crate::engine::score::Candidate]| {
        candidates
            .iter()
            .map(|c| CandidateSummary {
                name: divisions.name(c.id).to_string(),
                code: divisions.code(c.id).to_string(),
                score: c.score,
            })
            .collect()
    };

    let details = ParseDetails {
        score: run.metrics.score,
        reduce: run.metrics.reduce,
        extract: run.metrics.extract,
        provinces: summarize(&run.provinces),
        cities: summarize(&run.cities),
        counties: summarize(&run.counties),
        anchor: run.outcome.anchor.clone(),
    };
    let elapsed = run.metrics.total;

    ParseReport { text: text.to_string(), address: to_address(divisions, run.outcome), elapsed, details }
}

fn to_address(divisions: &Divisions, outcome: Outcome) -> Address {
    let name = |id| divisions.name(id).to_string();
    let resolution = outcome.resolution;
    Address {
        province: resolution.province.map(name),
        city: resolution.city.map(name),
        county: resolution.county.map(name),
        detail: outcome.detail,
        phone: outcome.phone,
        receiving_name: outcome.receiving_name,
    }
}
