//! Constraint-based reduction.
//!
//! Scoring produces per-level candidate lists that are individually
//! plausible but jointly inconsistent: the text may name a county from one
//! city next to an explicit mention of a different province. Reduction
//! commits to one consistent (province, city, county) triple in two moves:
//!
//! 1. Top-down propagation: a resolved ancestor constrains which candidates
//!    survive at the next level down.
//! 2. Bottom-up back-fill: the most specific resolved node overwrites its
//!    ancestors through the parent links, repairing anything the text got
//!    wrong or left out.
//!
//! No step fails; an unresolved slot simply stays empty.

use super::score::Candidate;
use crate::divisions::{DivisionId, Divisions};
use log::debug;

/// The committed triple. Any subset of the slots may be unresolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolution {
    pub province: Option<DivisionId>,
    pub city: Option<DivisionId>,
    pub county: Option<DivisionId>,
}

/// Run the reduction over the scored candidates.
pub fn reduce(
    divisions: &Divisions,
    mut province: Option<DivisionId>,
    cities: &[Candidate],
    counties: &[Candidate],
) -> Resolution {
    let mut city = province.and_then(|p| reduce_city(divisions, p, cities));

    // Without a province to constrain it, a city is only trusted when the
    // candidate list is unambiguous.
    if city.is_none() && province.is_none() && cities.len() == 1 {
        city = Some(cities[0].id);
    }

    let mut county = city.and_then(|c| reduce_county(divisions, c, counties));

    if county.is_none() && city.is_none() {
        county = match province {
            // Rank order: the first candidate under the resolved province
            // wins, even when its parent city was never mentioned.
            Some(p) => counties.iter().find(|c| divisions.is_descendant(p, c.id)).map(|c| c.id),
            // Total ambiguity: best-effort guess at the top-ranked county.
            None => counties.first().map(|c| c.id),
        };
        if let Some(id) = county {
            debug!("county fallback resolved {}", divisions.name(id));
        }
    }

    // Bottom-up repair: a resolved county pins its ancestors through the
    // parent links, overriding whatever the text claimed.
    if let Some(id) = county {
        city = divisions.parent(id);
    }
    if let Some(id) = city {
        province = divisions.parent(id);
    }

    Resolution { province, city, county }
}

/// Province → city. A municipality takes its first (placeholder) child
/// unconditionally, without consulting the text; everything else takes the
/// first candidate whose parent is the province.
fn reduce_city(divisions: &Divisions, province: DivisionId, cities: &[Candidate]) -> Option<DivisionId> {
    if divisions.is_municipality(province) {
        return divisions.children(province).first().copied();
    }
    cities.iter().find(|c| divisions.parent(c.id) == Some(province)).map(|c| c.id)
}

/// City → county: first candidate whose parent is the city.
fn reduce_county(divisions: &Divisions, city: DivisionId, counties: &[Candidate]) -> Option<DivisionId> {
    counties.iter().find(|c| divisions.parent(c.id) == Some(city)).map(|c| c.id)
}

/// The most specific resolved name, used to anchor detail extraction. A
/// municipality's placeholder city collapses to the municipality name.
pub fn anchor_name<'a>(divisions: &'a Divisions, resolution: &Resolution) -> &'a str {
    if let Some(id) = resolution.county {
        return divisions.name(id);
    }
    if let Some(id) = resolution.city {
        return divisions.good_name(id);
    }
    if let Some(id) = resolution.province {
        return divisions.name(id);
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::divisions::Divisions;
    use crate::engine::score::{rank, substring_score};

    fn table() -> Divisions {
        Divisions::from_json(
            r#"[
              {"code":"10","name":"东省","children":[
                {"code":"1001","name":"甲市","children":[
                  {"code":"100101","name":"青区"},
                  {"code":"100102","name":"白区"}]},
                {"code":"1002","name":"乙市","children":[
                  {"code":"100201","name":"红区"}]}]},
              {"code":"90","name":"北京市","children":[
                {"code":"9001","name":"市辖区","children":[
                  {"code":"900101","name":"首区"},
                  {"code":"900102","name":"次区"}]}]}
            ]"#,
        )
        .unwrap()
    }

    fn resolve(t: &Divisions, text: &str) -> Resolution {
        let province = rank(text, t, t.provinces(), substring_score).first().map(|c| c.id);
        let cities = rank(text, t, t.cities(), substring_score);
        let counties = rank(text, t, t.counties(), substring_score);
        reduce(t, province, &cities, &counties)
    }

    fn names(t: &Divisions, r: &Resolution) -> (Option<String>, Option<String>, Option<String>) {
        let name = |id: Option<crate::divisions::DivisionId>| id.map(|i| t.name(i).to_string());
        (name(r.province), name(r.city), name(r.county))
    }

    #[test]
    fn province_constrains_city_and_city_constrains_county() {
        let t = table();
        let r = resolve(&t, "东省甲市青区某路");
        assert_eq!(names(&t, &r), (Some("东省".into()), Some("甲市".into()), Some("青区".into())));
    }

    #[test]
    fn municipality_takes_first_child_without_matching_text() {
        let t = table();
        let r = resolve(&t, "北京市某路");
        assert_eq!(names(&t, &r), (Some("北京市".into()), Some("市辖区".into()), None));
        assert_eq!(anchor_name(&t, &r), "北京市", "placeholder city collapses for the anchor");
    }

    #[test]
    fn lone_city_candidate_is_trusted_without_a_province() {
        let t = table();
        let r = resolve(&t, "乙市红区某路");
        assert_eq!(names(&t, &r), (Some("东省".into()), Some("乙市".into()), Some("红区".into())));
    }

    #[test]
    fn ambiguous_cities_without_province_stay_unresolved() {
        let t = table();
        // Both 甲市 and 乙市 match; neither is committed, and no county
        // matches either, so everything stays empty.
        let r = resolve(&t, "甲市乙市");
        assert_eq!(names(&t, &r), (None, None, None));
    }

    #[test]
    fn county_fallback_searches_province_descendants_in_rank_order() {
        let t = table();
        // 首区 ranks first (full match) but belongs to 北京市; the fallback
        // must walk the rank order and take the first candidate that is
        // actually under the resolved province.
        let r = resolve(&t, "东省首区红");
        assert_eq!(names(&t, &r), (Some("东省".into()), Some("乙市".into()), Some("红区".into())));
    }

    #[test]
    fn total_ambiguity_guesses_the_top_county() {
        let t = table();
        let r = resolve(&t, "红区某路");
        assert_eq!(names(&t, &r), (Some("东省".into()), Some("乙市".into()), Some("红区".into())));
    }

    #[test]
    fn no_candidates_resolve_nothing() {
        let t = table();
        let r = resolve(&t, "别的地方");
        assert_eq!(names(&t, &r), (None, None, None));
        assert_eq!(anchor_name(&t, &r), "");
    }

    #[test]
    fn backfill_keeps_the_triple_mutually_consistent() {
        let t = table();
        // The text names a province that contradicts the only county match;
        // the county wins and its ancestors are back-filled from it.
        let r = resolve(&t, "东省首区");
        let (province, city, county) = names(&t, &r);
        // 首区 is not under 东省, so the descendant fallback rejects it.
        assert_eq!((province, city, county), (Some("东省".into()), None, None));

        // With a county that does resolve, ancestors always come from the
        // parent links.
        let r = resolve(&t, "甲市白区");
        assert_eq!(r.city, t.parent(r.county.unwrap()));
        assert_eq!(r.province, t.parent(r.city.unwrap()));
    }

    #[test]
    fn anchor_prefers_the_most_specific_slot() {
        let t = table();
        let r = resolve(&t, "东省甲市青区");
        assert_eq!(anchor_name(&t, &r), "青区");

        let r = resolve(&t, "东省甲市");
        assert_eq!(anchor_name(&t, &r), "甲市");

        let r = resolve(&t, "东省");
        assert_eq!(anchor_name(&t, &r), "东省");
    }
}
