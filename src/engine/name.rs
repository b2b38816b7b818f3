//! Recipient-name extraction.
//!
//! The text is split on a fixed separator class (ASCII punctuation and
//! whitespace plus the full-width marks that show up in pasted Chinese
//! addresses) and each token is scored for name-likeness. A plausible short
//! personal name wins outright; otherwise tokens collect penalties for
//! looking like address fragments (administrative-unit characters), house
//! numbers (all digits) or being too long, and the best non-negative token
//! is kept.

/// Characters that mark a token as an address fragment.
const ADMIN_UNIT_CHARS: &str = "省市县区乡镇村";

fn split_tokens(text: &str) -> Vec<&str> {
    regex!(r"[~!@#$^&*=':;',\\.<>/?~！@#￥……&*‘；：”“’。，、？\-\n \t]")
        .split(text)
        .filter(|token| !token.is_empty())
        .collect()
}

/// A plausible short personal name: CJK ideographs with an optional
/// interpunct (乌兰·图雅), at least two and fewer than four characters.
fn is_plausible_name(token: &str) -> bool {
    regex!(r"^[\u{4E00}-\u{9FFF}][\u{4E00}-\u{9FFF}·]*[\u{4E00}-\u{9FFF}]$").is_match(token)
        && token.chars().count() < 4
}

fn name_score(token: &str) -> i32 {
    if is_plausible_name(token) {
        return 100;
    }
    let mut score = 0;
    if token.chars().any(|ch| ADMIN_UNIT_CHARS.contains(ch)) {
        score -= 5;
    }
    if token.chars().all(|ch| ch.is_ascii_digit()) {
        score -= 1;
    }
    if token.chars().count() > 7 {
        score -= 1;
    }
    score
}

/// Pick the most name-like token, or nothing.
///
/// A lone token is returned only when it is a plausible name; with several
/// tokens the highest non-negative score wins and ties keep the earliest
/// token.
pub fn extract(text: &str) -> Option<String> {
    let tokens = split_tokens(text);
    if let [only] = tokens.as_slice() {
        return is_plausible_name(only).then(|| (*only).to_string());
    }

    let mut best: Option<(i32, &str)> = None;
    for token in tokens {
        let score = name_score(token);
        if score < 0 {
            continue;
        }
        match best {
            Some((top, _)) if top >= score => {}
            _ => best = Some((score, token)),
        }
    }
    best.map(|(_, token)| token.to_string())
}
