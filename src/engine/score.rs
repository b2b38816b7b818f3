//! Candidate scoring.
//!
//! Every division name of a level is scored against the raw input and the
//! survivors are ranked. Scoring is deliberately a single replaceable
//! function ([`ScoreFn`]); alternative strategies (edit distance, pinyin
//! matching) can be swapped in without touching the reduction logic, which
//! only ever sees ranked [`Candidate`] lists.

use crate::divisions::{DivisionId, Divisions};
use std::cmp::Reverse;

/// Pluggable match strategy: `(text, division_name) -> score`, zero meaning
/// no match.
pub type ScoreFn = fn(&str, &str) -> u32;

/// A scored division, alive only between scoring and reduction.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub score: u32,
    pub id: DivisionId,
}

/// Default two-tier substring strategy.
///
/// 10 for a literal occurrence of the full name; 9 when the name minus its
/// final character occurs instead, which tolerates text that drops the
/// administrative suffix (市/县/区); 0 otherwise. Char-based, so multi-byte
/// names truncate correctly.
pub fn substring_score(text: &str, name: &str) -> u32 {
    if text.contains(name) {
        return 10;
    }
    let mut chars = name.char_indices();
    if chars.next().is_some() {
        if let Some((last, _)) = chars.next_back() {
            if text.contains(&name[..last]) {
                return 9;
            }
        }
    }
    0
}

/// Score one level's nodes in enumeration order, keep matches, and rank them
/// by descending score. The sort is stable, so equal scores keep enumeration
/// order; tie determinism is part of the contract and is tested.
pub fn rank(text: &str, divisions: &Divisions, level: &[DivisionId], score: ScoreFn) -> Vec<Candidate> {
    let mut ranked: Vec<Candidate> = level
        .iter()
        .map(|&id| Candidate { score: score(text, divisions.name(id)), id })
        .filter(|c| c.score > 0)
        .collect();
    ranked.sort_by_key(|c| Reverse(c.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::divisions::Divisions;

    fn table() -> Divisions {
        Divisions::from_json(
            r#"[
              {"code":"10","name":"东省","children":[
                {"code":"1001","name":"甲市","children":[
                  {"code":"100101","name":"青区"},
                  {"code":"100102","name":"白区"}]}]}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn full_name_outranks_suffix_dropped() {
        assert_eq!(substring_score("广东省深圳市", "广东省"), 10);
        assert_eq!(substring_score("广东深圳", "广东省"), 9);
        assert_eq!(substring_score("湖南长沙", "广东省"), 0);
    }

    #[test]
    fn single_char_names_have_no_suffix_tier() {
        assert_eq!(substring_score("京城", "京"), 10);
        assert_eq!(substring_score("城里", "京"), 0);
    }

    #[test]
    fn rank_is_descending_and_tie_stable() {
        let t = table();
        let ranked = rank("青区白区", &t, t.counties(), substring_score);
        let names: Vec<&str> = ranked.iter().map(|c| t.name(c.id)).collect();
        assert_eq!(names, ["青区", "白区"], "equal scores keep enumeration order");

        let again = rank("青区白区", &t, t.counties(), substring_score);
        let names_again: Vec<&str> = again.iter().map(|c| t.name(c.id)).collect();
        assert_eq!(names, names_again, "ranking is deterministic");
    }

    #[test]
    fn rank_mixes_tiers_by_score() {
        let t = table();
        // 白区 literal (10) must outrank 青区 matched without its suffix (9)
        // even though 青区 enumerates first.
        let ranked = rank("青和白区", &t, t.counties(), substring_score);
        let scored: Vec<(&str, u32)> = ranked.iter().map(|c| (t.name(c.id), c.score)).collect();
        assert_eq!(scored, [("白区", 10), ("青区", 9)]);
    }

    #[test]
    fn exact_province_mention_ranks_first() {
        let t = table();
        let ranked = rank("东省某地", &t, t.provinces(), substring_score);
        assert_eq!(ranked.first().map(|c| t.name(c.id)), Some("东省"));
        assert!(rank("别处", &t, t.provinces(), substring_score).is_empty());
    }
}
