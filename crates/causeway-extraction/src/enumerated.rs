//! Numbered-list replies (`1. foo`, `2) bar`).

use std::sync::LazyLock;

use regex::Regex;

use causeway_core::ParseFailure;

static ITEM_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s*(.+)$").ok());

/// Item text of every enumerated line, in order. No items is a failure.
pub fn parse_enumerated(raw: &str, expected: &str) -> Result<Vec<String>, ParseFailure> {
    let Some(re) = ITEM_REGEX.as_ref() else {
        return Err(ParseFailure::new(expected, "item pattern unavailable", raw));
    };
    let items: Vec<String> = raw
        .lines()
        .filter_map(|line| re.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();

    if items.is_empty() {
        return Err(ParseFailure::new(expected, "no enumerated items", raw));
    }
    Ok(items)
}
