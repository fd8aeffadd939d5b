//! Closed set of per-subject memory records and their merge policies.

pub mod record;

pub use record::{RecordKind, RecordName};
