//! Result entities produced by the builtin tools

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One filesystem path found by `glob`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub path: String,
    pub name: String,
    pub is_dir: bool,

    /// Size in bytes (only with `include_info`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Permission string such as `-rw-r--r--` (only with `include_info`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// RFC 3339 modification time (only with `include_info`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
}

/// One matching line found by `grep` or `search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrepMatch {
    pub file: String,

    /// 1-based line number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,

    /// Full text of the line
    pub content: String,

    /// Capture groups 1..n
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub captures: Vec<String>,

    /// 1-based byte offset of the match start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,

    /// Surrounding lines, including the matching line
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<String>,
}

/// Aggregate counters for a `grep` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatistics {
    pub files_searched: usize,
    pub files_matched: usize,
    pub total_matches: usize,
    /// Match count keyed by first capture group, or by line text
    pub frequency: BTreeMap<String, usize>,
}

impl SearchStatistics {
    /// Count one match under `key`
    pub fn record(&mut self, key: &str) {
        self.total_matches += 1;
        *self.frequency.entry(key.to_string()).or_insert(0) += 1;
    }
}
