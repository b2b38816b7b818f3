//! Detail-address extraction.
//!
//! Once reduction has committed to an anchor name, the detail address is
//! simply the run of address-ish characters immediately following the
//! anchor's literal occurrence in the text. Address-ish means CJK
//! ideographs, ASCII alphanumerics/underscore, and both ASCII and
//! full-width parentheses; any other character (punctuation, whitespace)
//! terminates the run.

use regex::Regex;

// CJK blocks: radicals supplement, Kangxi radicals, strokes, Ext-A, the
// unified block, compatibility ideographs, Ext-B..F and the compatibility
// supplement.
const CJK: &str = "\\u{2E80}-\\u{2EFF}\\u{2F00}-\\u{2FDF}\\u{31C0}-\\u{31EF}\\u{3400}-\\u{4DBF}\\u{4E00}-\\u{9FFF}\\u{F900}-\\u{FAFF}\\u{20000}-\\u{2A6DF}\\u{2A700}-\\u{2B73F}\\u{2B740}-\\u{2B81F}\\u{2B820}-\\u{2CEAF}\\u{2F800}-\\u{2FA1F}";

/// Extract the detail address following `anchor` in `text`.
///
/// When the exact anchor does not occur and it is longer than two
/// characters, a second attempt makes its final character optional; the
/// text frequently keeps 赛罕 where the table says 赛罕区. An empty anchor
/// degrades to the first address-ish run in the text, the best effort when
/// nothing resolved at all. No match is a valid absent field, not an error.
pub fn extract(text: &str, anchor: &str) -> Option<String> {
    if let Some(detail) = capture_after(text, &regex::escape(anchor)) {
        return Some(detail);
    }
    if anchor.chars().count() > 2 {
        let split = anchor.char_indices().next_back().map(|(i, _)| i)?;
        let (head, last) = anchor.split_at(split);
        let lenient = format!("{}{}?", regex::escape(head), regex::escape(last));
        return capture_after(text, &lenient);
    }
    None
}

fn capture_after(text: &str, prefix: &str) -> Option<String> {
    let pattern = format!("{prefix}([{CJK}0-9A-Za-z_()（）]+)");
    let re = Regex::new(&pattern).ok()?;
    re.captures(text).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_the_run_after_the_anchor() {
        assert_eq!(extract("广东省深圳市宝安区盘山路28号幸福茶庄,张三", "宝安区").as_deref(), Some("盘山路28号幸福茶庄"));
    }

    #[test]
    fn run_stops_at_separators_but_keeps_parentheses() {
        assert_eq!(
            extract("东城区前门东大街11号(天安门广场南面)毛主席纪念堂 若兮相言", "东城区").as_deref(),
            Some("前门东大街11号(天安门广场南面)毛主席纪念堂"),
        );
        assert_eq!(extract("甲区大街（东侧）门口, 其他", "甲区").as_deref(), Some("大街（东侧）门口"));
    }

    #[test]
    fn trailing_anchor_character_may_be_dropped_in_the_text() {
        // 深圳市 never occurs literally; the lenient retry matches 深圳.
        assert_eq!(extract("广东深圳东大街11号 李莲英", "深圳市").as_deref(), Some("东大街11号"));
    }

    #[test]
    fn short_anchors_get_no_lenient_retry() {
        assert_eq!(extract("甲乙大街1号", "甲市"), None);
    }

    #[test]
    fn unmatched_anchor_yields_nothing() {
        assert_eq!(extract("someplace else", "宝安区"), None);
        // Even the lenient form needs the head of the anchor present.
        assert_eq!(extract("安区盘山路", "宝安区"), None);
    }

    #[test]
    fn empty_anchor_takes_the_first_address_run() {
        assert_eq!(extract("盘山路28号幸福茶庄,张三", "").as_deref(), Some("盘山路28号幸福茶庄"));
        assert_eq!(extract(",,,", ""), None);
    }
}
