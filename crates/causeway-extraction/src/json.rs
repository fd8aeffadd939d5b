//! Tolerant JSON coercion.

use serde::de::DeserializeOwned;

use causeway_core::ParseFailure;

use crate::fences::fenced_blocks;

/// A balanced top-level `{...}` or `[...]` region of a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonSpan<'a> {
    /// Byte offset of the opening bracket.
    pub start: usize,
    /// Byte offset one past the closing bracket.
    pub end: usize,
    pub text: &'a str,
}

/// A value recovered from a span of a larger reply.
#[derive(Debug, Clone)]
pub struct Located<'a, T> {
    pub value: T,
    pub span: JsonSpan<'a>,
}

/// Coerce a reply into `T`.
///
/// Tries the trimmed reply, then the first fenced block, then each balanced
/// top-level span in order. The first candidate that deserializes wins.
pub fn parse_json<T: DeserializeOwned>(raw: &str, expected: &str) -> Result<T, ParseFailure> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseFailure::new(expected, "empty reply", raw));
    }

    let strict_err = match serde_json::from_str::<T>(trimmed) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if let Some(block) = fenced_blocks(raw).into_iter().next() {
        if let Ok(value) = serde_json::from_str::<T>(block.trim()) {
            return Ok(value);
        }
    }

    match locate_json_object::<T>(raw) {
        Some(located) => Ok(located.value),
        None => Err(ParseFailure::new(
            expected,
            format!("no JSON candidate matched ({strict_err})"),
            raw,
        )),
    }
}

/// First balanced top-level span that deserializes into `T`, with its position.
pub fn locate_json_object<T: DeserializeOwned>(text: &str) -> Option<Located<'_, T>> {
    balanced_spans(text).into_iter().find_map(|span| {
        serde_json::from_str::<T>(span.text)
            .ok()
            .map(|value| Located { value, span })
    })
}

/// Every balanced top-level bracket span, string- and escape-aware.
///
/// An opening bracket that never balances is skipped and scanning resumes
/// on the next byte.
pub fn balanced_spans(text: &str) -> Vec<JsonSpan<'_>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        if matches!(bytes[pos], b'{' | b'[') {
            if let Some(end) = scan_balanced(bytes, pos) {
                spans.push(JsonSpan {
                    start: pos,
                    end,
                    text: &text[pos..end],
                });
                pos = end;
                continue;
            }
        }
        pos += 1;
    }
    spans
}

// Bracket and quote bytes are ASCII, so byte offsets always land on char
// boundaries.
fn scan_balanced(bytes: &[u8], start: usize) -> Option<usize> {
    let mut closers: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => closers.push(b'}'),
            b'[' => closers.push(b']'),
            b'}' | b']' => {
                if closers.pop() != Some(b) {
                    return None;
                }
                if closers.is_empty() {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Pairs {
        pairs: Vec<String>,
    }

    #[test]
    fn strict_path() {
        let parsed: Pairs = parse_json(r#" {"pairs": ["a"]} "#, "pairs").unwrap();
        assert_eq!(parsed.pairs, ["a"]);
    }

    #[test]
    fn prose_around_payload() {
        let raw = "Sure! Here you go:\n{\"pairs\": [\"a\", \"b\"]}\nLet me know.";
        let parsed: Pairs = parse_json(raw, "pairs").unwrap();
        assert_eq!(parsed.pairs, ["a", "b"]);
    }

    #[test]
    fn braces_inside_strings_do_not_unbalance() {
        let raw = r#"note {"pairs": ["a } b", "c \" { d"]} end"#;
        let parsed: Pairs = parse_json(raw, "pairs").unwrap();
        assert_eq!(parsed.pairs, ["a } b", "c \" { d"]);
    }

    #[test]
    fn skips_spans_of_the_wrong_shape() {
        let raw = r#"[draft] {"other": 1} {"pairs": []}"#;
        let located = locate_json_object::<Pairs>(raw).unwrap();
        assert!(located.value.pairs.is_empty());
        assert_eq!(located.span.start, raw.rfind('{').unwrap());
    }

    #[test]
    fn unbalanced_reply_is_a_parse_failure() {
        let err = parse_json::<Pairs>("{\"pairs\": [", "pairs object").unwrap_err();
        assert_eq!(err.expected, "pairs object");
        assert_eq!(err.raw, "{\"pairs\": [");
    }

    #[test]
    fn multibyte_text_is_safe() {
        let raw = "café → 咖啡 {\"pairs\": [\"ü\"]} ✓";
        let parsed: Pairs = parse_json(raw, "pairs").unwrap();
        assert_eq!(parsed.pairs, ["ü"]);
    }
}
