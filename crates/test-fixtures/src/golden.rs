//! Golden scenario loader.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::scripted::ScriptedReasoner;

/// A transcript with one scripted reply per pipeline stage and the
/// outcome the pipeline must reach.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenario {
    pub name: String,
    pub model_id: String,
    pub transcript: String,
    /// Stage replies in call order.
    pub replies: Vec<String>,
    pub expected: GoldenExpectation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoldenExpectation {
    pub causal_pairs_found: usize,
    pub causal_chains: Vec<String>,
    pub scored_chains: usize,
    /// `link` of the top-ranked intervention, if any.
    #[serde(default)]
    pub top_intervention: Option<String>,
    pub intervention_count: usize,
}

impl GoldenScenario {
    /// A scripted service primed with this scenario's replies.
    pub fn reasoner(&self) -> ScriptedReasoner {
        ScriptedReasoner::with_replies(self.model_id.clone(), self.replies.clone())
    }
}

/// Root of the fixture data: the nearest ancestor holding `test-fixtures/golden`.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);
    while !path.join("test-fixtures").join("golden").is_dir() {
        if !path.pop() {
            panic!("could not find test-fixtures/golden from CARGO_MANIFEST_DIR={manifest_dir}");
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture.
///
/// # Panics
/// Panics if the file is missing or malformed.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// All JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    let Ok(entries) = std::fs::read_dir(&dir) else {
        return Vec::new();
    };
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    paths
}
