//! Session update protocol: locate the `{"memory_updates": {...}}` block in a
//! reply, and cut the subject-facing text where that block begins.

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

use causeway_core::constants::MEMORY_UPDATES_KEY;
use causeway_extraction::{enclosing_fence_start, locate_json_object};

/// One `name → body` entry, exactly as proposed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProposedUpdate {
    pub name: String,
    pub body: Value,
}

/// Parsed update block and where it starts in the reply.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateBlock {
    /// Entries in proposal order.
    pub updates: Vec<ProposedUpdate>,
    /// Byte offset of the block's opening brace.
    pub start: usize,
}

/// Map that keeps its entries in document order.
struct OrderedEntries(Vec<ProposedUpdate>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of record updates")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((name, body)) = map.next_entry::<String, Value>()? {
                    entries.push(ProposedUpdate { name, body });
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Deserialize)]
struct UpdateEnvelope {
    memory_updates: OrderedEntries,
}

/// First balanced object in `reply` carrying a `memory_updates` object.
pub fn parse_update_block(reply: &str) -> Option<UpdateBlock> {
    let located = locate_json_object::<UpdateEnvelope>(reply)?;
    Some(UpdateBlock {
        updates: located.value.memory_updates.0,
        start: located.span.start,
    })
}

/// Subject-facing text: everything before the update block.
///
/// Cuts at the block (or at a code fence opening right before it). Without
/// a parseable block, cuts at the first `memory_updates` marker, backed up
/// to the brace that opens it. The result is trimmed.
pub fn extract_response(reply: &str, block: Option<&UpdateBlock>) -> String {
    let cut = match block {
        Some(block) => Some(block.start),
        None => reply.find(MEMORY_UPDATES_KEY).map(|marker| opening_brace(reply, marker)),
    };
    let text = match cut {
        Some(offset) => {
            let offset = enclosing_fence_start(reply, offset).unwrap_or(offset);
            &reply[..offset]
        }
        None => reply,
    };
    text.trim().to_string()
}

/// Offset of the `{` that opens the object holding the marker, else the marker itself.
fn opening_brace(reply: &str, marker: usize) -> usize {
    let head = reply[..marker].trim_end_matches(|c: char| c.is_whitespace() || c == '"');
    match head.strip_suffix('{') {
        Some(before) => before.len(),
        None => marker,
    }
}
