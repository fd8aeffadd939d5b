//! # causeway-memory
//!
//! Long-running per-subject state. Each subject owns one record per
//! [`RecordName`](causeway_core::RecordName); a conversational collaborator
//! proposes free-text updates after every session and [`SubjectMemory`]
//! merges them by record kind (replace vs. append).

pub mod prompts;
pub mod protocol;
pub mod session;
pub mod store;
pub mod subject;
pub mod summary;

pub use protocol::{extract_response, parse_update_block, ProposedUpdate, UpdateBlock};
pub use session::SessionAgent;
pub use store::{FsStore, InMemoryStore};
pub use subject::{MergeOutcome, SubjectMemory};
pub use summary::{ProtocolDigest, ProtocolSummary};
