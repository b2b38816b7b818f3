//! Rule-based Chinese shipping-address parsing.
//!
//! One line of pasted text like "深圳市宝安区盘山路28号幸福茶庄,张三，13956232345"
//! goes in; a structured record with province/city/county, detail address,
//! recipient name and phone number comes out. The administrative region is
//! resolved by scoring every division name of the national three-level table
//! against the text and reducing the candidate lists to one mutually
//! consistent triple, repairing missing ancestors through the parent links.
//!
//! Absence of any field is a valid result, never an error; the only failure
//! mode in the crate is loading a malformed division table.
//!
//! ```
//! use kuaidi::parse;
//!
//! let out = parse("广东省宝安区盘山路28号幸福茶庄  张三，13956232345");
//! assert_eq!(out.city.as_deref(), Some("深圳市"));
//! assert_eq!(out.receiving_name.as_deref(), Some("张三"));
//! ```

#[macro_use]
mod macros;
mod api;
mod divisions;
mod engine;

pub use api::{
    Address, CandidateSummary, ParseDetails, ParseReport, parse, parse_verbose_with, parse_with,
    parse_with_score,
};
pub use divisions::{DivisionId, Divisions, Level, LoadError, MUNICIPALITIES};
pub use engine::ScoreFn;
