//! Wiki-link extraction.
//!
//! Two forms are recognised: `[[Name]]` and `[[Name|Display Text]]`. Only the
//! name is returned, trimmed. Names cannot contain `]` or `|`. Nothing here
//! checks that the named note exists.

use once_cell::sync::Lazy;
use regex::Regex;

static WIKILINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]+)?\]\]").expect("wikilink regex"));

/// Link targets in order of appearance.
pub fn iter(body: &str) -> impl Iterator<Item = &str> {
    WIKILINK_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
}

/// Link targets in order of appearance, duplicates kept.
pub fn extract(body: &str) -> Vec<String> {
    iter(body).map(str::to_string).collect()
}
