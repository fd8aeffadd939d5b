//! # causeway-extraction
//!
//! Structured extraction over a nondeterministic text collaborator.
//!
//! Replies are coerced in a fixed order: strict JSON, then the first fenced
//! code block, then each balanced top-level `{...}` / `[...]` span. Failures
//! surface as [`ParseFailure`](causeway_core::ParseFailure) values, never as
//! errors, so callers can degrade locally.

pub mod enumerated;
pub mod extractor;
pub mod fences;
pub mod json;

pub use enumerated::parse_enumerated;
pub use extractor::StructuredExtractor;
pub use fences::{enclosing_fence_start, fenced_blocks};
pub use json::{balanced_spans, locate_json_object, parse_json, JsonSpan, Located};
