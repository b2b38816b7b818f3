//! The administrative division table.
//!
//! A three-level forest (province → city → county) loaded once from a nested
//! JSON resource and immutable afterwards. Nodes live in an arena owned by
//! [`Divisions`]; [`DivisionId`] is an index into that arena, and parent
//! links are plain `Option<DivisionId>` back-references, so ancestor walks
//! are O(1) per hop and there are no ownership cycles.
//!
//! ## The municipality collapse
//!
//! The four municipalities (北京/天津/上海/重庆) have no real city level. In
//! the source data each one carries a single placeholder "city" child whose
//! own children are the actual districts, one level deeper than their
//! administrative rank. The engine has to treat that placeholder as
//! definitionally identical to the province: [`Divisions::good_name`]
//! collapses it back to the municipality's display name, and the city-level
//! enumeration scores the municipality's *own* name instead of the
//! placeholder (see [`Divisions::cities`]).
//!
//! Codes are trusted to be unique and the nesting well-formed; a malformed
//! resource is a fatal [`LoadError`] at load time, never a parse-time error.

use once_cell::sync::Lazy;
use serde::Deserialize;
use thiserror::Error;

/// Names of the four municipalities whose city level is degenerate.
pub const MUNICIPALITIES: [&str; 4] = ["北京市", "天津市", "上海市", "重庆市"];

static BUNDLED: Lazy<Divisions> = Lazy::new(|| {
    Divisions::from_json(include_str!("../data/divisions.json"))
        .expect("bundled division table is well-formed")
});

/// Handle to a division node, valid for the [`Divisions`] that produced it.
///
/// Two ids from the same table are equal exactly when they refer to the same
/// node; since codes are unique, this matches code-based equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DivisionId(u32);

/// Administrative rank of a node, assigned by nesting depth at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Province,
    City,
    County,
}

#[derive(Debug)]
struct Division {
    code: String,
    name: String,
    level: Level,
    parent: Option<DivisionId>,
    children: Vec<DivisionId>,
}

/// Raw record shape of the JSON resource: `{code, name, children}`, three
/// levels deep, `children` absent on leaves.
#[derive(Debug, Deserialize)]
struct RawDivision {
    code: String,
    name: String,
    #[serde(default)]
    children: Vec<RawDivision>,
}

/// Fatal condition while loading the division table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid division data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("division data contains no provinces")]
    Empty,
}

/// The in-memory division forest plus its per-level enumeration orders.
///
/// Built once, read-only afterwards; concurrent reads need no locking. The
/// per-level orders are precomputed because they are part of the observable
/// contract: candidate ranking breaks score ties by enumeration order.
#[derive(Debug)]
pub struct Divisions {
    nodes: Vec<Division>,
    provinces: Vec<DivisionId>,
    cities: Vec<DivisionId>,
    counties: Vec<DivisionId>,
}

impl Divisions {
    /// Build a table from the nested `{code, name, children}` JSON format.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let raw: Vec<RawDivision> = serde_json::from_str(json)?;
        if raw.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut table = Divisions { nodes: Vec::new(), provinces: Vec::new(), cities: Vec::new(), counties: Vec::new() };
        for province in raw {
            let id = table.attach(province, None, Level::Province);
            table.provinces.push(id);
        }

        // City enumeration order mirrors the data: children of ordinary
        // provinces first, then the municipality province nodes themselves.
        // The placeholder city under a municipality never takes part in
        // scoring; the municipality's own name stands in for it.
        let mut cities = Vec::new();
        for &province in &table.provinces {
            if !table.is_municipality(province) {
                cities.extend_from_slice(table.children(province));
            }
        }
        cities.extend(table.provinces.iter().copied().filter(|&p| table.is_municipality(p)));
        table.cities = cities;

        let mut counties = Vec::new();
        for &province in &table.provinces {
            for &city in table.children(province) {
                counties.extend_from_slice(table.children(city));
            }
        }
        table.counties = counties;

        Ok(table)
    }

    /// The table embedded in the crate, materialized on first use.
    ///
    /// Malformed embedded data aborts initialization; there is no recovery
    /// path once the resource itself is broken.
    pub fn bundled() -> &'static Divisions {
        &BUNDLED
    }

    fn attach(&mut self, raw: RawDivision, parent: Option<DivisionId>, level: Level) -> DivisionId {
        let id = DivisionId(self.nodes.len() as u32);
        self.nodes.push(Division { code: raw.code, name: raw.name, level, parent, children: Vec::new() });

        let child_level = match level {
            Level::Province => Level::City,
            Level::City | Level::County => Level::County,
        };
        for child in raw.children {
            let child_id = self.attach(child, Some(id), child_level);
            self.nodes[id.0 as usize].children.push(child_id);
        }
        id
    }

    fn node(&self, id: DivisionId) -> &Division {
        &self.nodes[id.0 as usize]
    }

    /// Display name, e.g. "广东省".
    pub fn name(&self, id: DivisionId) -> &str {
        &self.node(id).name
    }

    /// Opaque unique code, e.g. "440306".
    pub fn code(&self, id: DivisionId) -> &str {
        &self.node(id).code
    }

    pub fn level(&self, id: DivisionId) -> Level {
        self.node(id).level
    }

    /// Stored back-reference; `None` for provinces.
    pub fn parent(&self, id: DivisionId) -> Option<DivisionId> {
        self.node(id).parent
    }

    pub fn children(&self, id: DivisionId) -> &[DivisionId] {
        &self.node(id).children
    }

    /// Province-level nodes in data order.
    pub fn provinces(&self) -> &[DivisionId] {
        &self.provinces
    }

    /// City-level scoring enumeration: ordinary provinces' children in data
    /// order, then the four municipality province nodes.
    pub fn cities(&self) -> &[DivisionId] {
        &self.cities
    }

    /// All depth-2 nodes; for municipalities these are the real districts
    /// under the placeholder city.
    pub fn counties(&self) -> &[DivisionId] {
        &self.counties
    }

    pub fn is_municipality(&self, id: DivisionId) -> bool {
        let node = self.node(id);
        node.level == Level::Province && MUNICIPALITIES.contains(&node.name.as_str())
    }

    /// True iff `candidate` is a direct or transitive child of `ancestor`.
    ///
    /// A node is not its own descendant, and a childless ancestor matches
    /// nothing. Implemented as a parent-chain walk, which is equivalent to a
    /// subtree search on a forest.
    pub fn is_descendant(&self, ancestor: DivisionId, candidate: DivisionId) -> bool {
        let mut current = self.parent(candidate);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// The name to show for a city-level node: a municipality's placeholder
    /// collapses to the municipality's own name, everything else keeps its
    /// name.
    pub fn good_name(&self, id: DivisionId) -> &str {
        match self.parent(id) {
            Some(parent) if self.is_municipality(parent) => self.name(parent),
            _ => self.name(id),
        }
    }
}
