//! Builtin tools for Scout
//!
//! - `glob`: path matching with recursive `**` support
//! - `grep`: line-oriented regex search over an explicit file list
//! - `search`: regex search over a file or directory tree with context windows

pub mod glob;
pub mod grep;
pub mod search;

use scout_foundation::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Decode a parameter payload into a typed input
pub(crate) fn decode<T: DeserializeOwned>(input: Value) -> Result<T> {
    serde_json::from_value(input).map_err(|e| Error::InvalidInput(format!("Invalid input: {}", e)))
}

/// Check a caller-supplied numeric bound and convert it to a count
pub(crate) fn non_negative(name: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| Error::validation(format!("'{}' must be >= 0, got {}", name, value)))
}

/// Resolve a possibly relative path against the working directory
pub(crate) fn resolve_path(working_dir: &Path, raw: &str) -> PathBuf {
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        working_dir.join(path)
    }
}

/// Accept either a single string or a list of strings
pub(crate) fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}
