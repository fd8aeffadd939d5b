//! Test support for Causeway: a scripted reasoning service and loaders for
//! the golden scenarios under `test-fixtures/golden/`.

pub mod golden;
pub mod scripted;

pub use golden::{fixture_path, list_fixtures, load_fixture, GoldenExpectation, GoldenScenario};
pub use scripted::{RecordedCall, ScriptedReasoner, ScriptedReply};
