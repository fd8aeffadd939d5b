//! Markdown code fences around JSON payloads.

use std::sync::LazyLock;

use regex::Regex;

static FENCE_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").ok());

static OPENING_FENCE_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_-]*[ \t]*\r?\n?\s*$").ok());

/// Contents of every fenced block, in order of appearance.
pub fn fenced_blocks(text: &str) -> Vec<&str> {
    let Some(re) = FENCE_REGEX.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Byte offset of an opening fence that immediately precedes `offset`.
///
/// Used to cut a reply where a fenced payload begins rather than in the
/// middle of the fence.
pub fn enclosing_fence_start(text: &str, offset: usize) -> Option<usize> {
    let head = text.get(..offset)?;
    let re = OPENING_FENCE_REGEX.as_ref()?;
    re.find(head).map(|m| m.start())
}
