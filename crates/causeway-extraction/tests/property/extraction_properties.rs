//! Property tests for the tolerant JSON path.

use std::collections::BTreeMap;

use proptest::prelude::*;

use causeway_extraction::{balanced_spans, locate_json_object, parse_json};

fn array_strategy() -> impl Strategy<Value = Vec<BTreeMap<String, String>>> {
    prop::collection::vec(object_strategy(), 0..4)
}

fn object_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z_]{1,8}", "[^`]{0,20}", 0..6)
}

proptest! {
    #[test]
    fn clean_json_parses_to_itself(map in object_strategy()) {
        let raw = serde_json::to_string(&map).unwrap();
        let parsed: BTreeMap<String, String> = parse_json(&raw, "object").unwrap();
        prop_assert_eq!(parsed, map);
    }

    #[test]
    fn span_locator_agrees_with_strict_parse_on_objects(map in object_strategy()) {
        let raw = serde_json::to_string(&map).unwrap();
        let strict: BTreeMap<String, String> = serde_json::from_str(&raw).unwrap();
        let located = locate_json_object::<BTreeMap<String, String>>(&raw).unwrap();
        prop_assert_eq!(located.value, strict);
        prop_assert_eq!(located.span.start, 0);
        prop_assert_eq!(located.span.end, raw.len());
    }

    #[test]
    fn span_locator_agrees_with_strict_parse_on_arrays(items in array_strategy()) {
        let raw = serde_json::to_string_pretty(&items).unwrap();
        let strict: Vec<BTreeMap<String, String>> = serde_json::from_str(&raw).unwrap();
        let located = locate_json_object::<Vec<BTreeMap<String, String>>>(&raw).unwrap();
        prop_assert_eq!(located.value, strict);
        prop_assert_eq!(located.span.text, raw.as_str());
    }

    #[test]
    fn prose_and_fences_do_not_change_the_result(
        map in object_strategy(),
        before in "[A-Za-z ,.!]{0,40}",
        after in "[A-Za-z ,.!]{0,40}",
        fenced in any::<bool>(),
    ) {
        let json = serde_json::to_string_pretty(&map).unwrap();
        let raw = if fenced {
            format!("{before}\n```json\n{json}\n```\n{after}")
        } else {
            format!("{before} {json} {after}")
        };
        let parsed: BTreeMap<String, String> = parse_json(&raw, "object").unwrap();
        prop_assert_eq!(parsed, map);
    }

    #[test]
    fn spans_are_ordered_and_on_char_boundaries(text in ".{0,200}") {
        let spans = balanced_spans(&text);
        let mut last_end = 0;
        for span in spans {
            prop_assert!(span.start >= last_end);
            prop_assert!(span.end > span.start);
            prop_assert_eq!(&text[span.start..span.end], span.text);
            last_end = span.end;
        }
    }
}
