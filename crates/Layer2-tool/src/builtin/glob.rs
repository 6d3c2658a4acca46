//! Glob tool - find filesystem entries by pattern
//!
//! Resolves one or more patterns (including recursive `**` patterns) against a base
//! directory. Entries matched by several patterns are reported once.

use super::{decode, resolve_path, string_or_list};
use crate::types::MatchEntry;
use crate::walk::{self, ExpandOptions, RecursivePattern};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scout_foundation::{Error, Result, Tool, ToolContext, ToolDef, ToolMeta, ToolResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, trace};

/// Sort key for glob results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Size,
    Modtime,
}

/// Sort direction for glob results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Glob tool input
#[derive(Debug, Clone, Deserialize)]
pub struct GlobInput {
    /// Glob patterns (e.g. "**/*.rs", "src/*.toml")
    #[serde(alias = "pattern", deserialize_with = "string_or_list")]
    pub patterns: Vec<String>,

    /// Base directory (default: working directory)
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default = "default_true")]
    pub case_sensitive: bool,

    #[serde(default)]
    pub follow_symlinks: bool,

    #[serde(default)]
    pub sort_by: SortBy,

    #[serde(default)]
    pub sort_order: SortOrder,

    /// Populate size, mode and modification time
    #[serde(default)]
    pub include_info: bool,
}

fn default_true() -> bool {
    true
}

/// Glob result payload
#[derive(Debug, Clone, Serialize)]
pub struct GlobOutput {
    pub matches: Vec<MatchEntry>,
    pub count: usize,
    /// All input patterns joined with ", "
    pub pattern: String,
}

impl GlobOutput {
    fn render(&self) -> String {
        if self.matches.is_empty() {
            return format!("No paths matched pattern '{}'", self.pattern);
        }

        let lines: Vec<String> = self
            .matches
            .iter()
            .map(|entry| match (&entry.size, &entry.mode, &entry.modified) {
                (Some(size), Some(mode), Some(modified)) => {
                    format!("{}\t{}\t{}\t{}", mode, size, modified, entry.path)
                }
                _ if entry.is_dir => format!("{}/", entry.path),
                _ => entry.path.clone(),
            })
            .collect();

        format!("{} paths matched:\n{}", self.count, lines.join("\n"))
    }
}

/// An entry together with the raw fields used for sorting
struct Candidate {
    entry: MatchEntry,
    size: u64,
    modified: Option<SystemTime>,
}

impl Candidate {
    fn stat(path: &Path, follow_symlinks: bool, include_info: bool) -> Option<Self> {
        let metadata = if follow_symlinks {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        };
        let metadata = match metadata {
            Ok(m) => m,
            Err(e) => {
                trace!("skipping unstatable match {}: {}", path.display(), e);
                return None;
            }
        };

        let size = metadata.len();
        let modified = metadata.modified().ok();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let entry = MatchEntry {
            path: path.display().to_string(),
            name,
            is_dir: metadata.is_dir(),
            size: include_info.then_some(size),
            mode: include_info.then(|| permission_string(&metadata)),
            modified: if include_info {
                modified.map(|t| DateTime::<Utc>::from(t).to_rfc3339())
            } else {
                None
            },
        };

        Some(Self {
            entry,
            size,
            modified,
        })
    }
}

#[cfg(unix)]
fn permission_string(metadata: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;

    let mode = metadata.permissions().mode();
    let mut out = String::with_capacity(10);
    out.push(file_kind(metadata));
    for shift in [6, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        out.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        out.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    out
}

#[cfg(not(unix))]
fn permission_string(metadata: &Metadata) -> String {
    let bits = if metadata.permissions().readonly() {
        "r--r--r--"
    } else {
        "rw-rw-rw-"
    };
    format!("{}{}", file_kind(metadata), bits)
}

fn file_kind(metadata: &Metadata) -> char {
    if metadata.is_dir() {
        'd'
    } else if metadata.file_type().is_symlink() {
        'l'
    } else {
        '-'
    }
}

fn sort_candidates(candidates: &mut [Candidate], by: SortBy, order: SortOrder) {
    candidates.sort_by(|a, b| {
        let primary = match by {
            SortBy::Name => a.entry.name.cmp(&b.entry.name),
            SortBy::Size => a.size.cmp(&b.size),
            SortBy::Modtime => a.modified.cmp(&b.modified),
        };
        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        match primary {
            Ordering::Equal => a.entry.path.cmp(&b.entry.path),
            other => other,
        }
    });
}

/// Glob tool
pub struct GlobTool;

impl GlobTool {
    pub fn new() -> Self {
        Self
    }

    /// Tool name
    pub const NAME: &'static str = "glob";

    fn definition() -> ToolDef {
        ToolDef::builder(
            Self::NAME,
            "Find files and directories matching one or more glob patterns. \
             Supports recursive '**' patterns; results are deduplicated and sorted.",
        )
        .string_array_param(
            "patterns",
            "Glob patterns (e.g. '**/*.rs', 'src/*.toml'); '**' may appear once per pattern",
            1,
            true,
        )
        .string_param(
            "path",
            "Base directory for relative patterns (default: working directory)",
            false,
        )
        .boolean_param("case_sensitive", "Case-sensitive matching (default: true)", false)
        .boolean_param(
            "follow_symlinks",
            "Descend into symlinked directories (default: false)",
            false,
        )
        .enum_param("sort_by", "Sort key (default: name)", &["modtime", "name", "size"], false)
        .enum_param("sort_order", "Sort direction (default: asc)", &["asc", "desc"], false)
        .boolean_param(
            "include_info",
            "Include size, permissions and modification time",
            false,
        )
        .build()
    }

    /// Decode and validate without touching the filesystem
    pub fn parse(input: Value) -> Result<GlobInput> {
        let parsed: GlobInput = decode(input)?;

        if parsed.patterns.is_empty() {
            return Err(Error::validation("at least one pattern is required"));
        }
        for pattern in &parsed.patterns {
            if pattern.is_empty() {
                return Err(Error::validation("patterns must not be empty strings"));
            }
            RecursivePattern::parse(pattern)?;
        }

        Ok(parsed)
    }

    /// Resolve every pattern and return the deduplicated, sorted union
    pub fn find(input: &GlobInput, working_dir: &Path) -> Result<GlobOutput> {
        let base = match &input.path {
            Some(p) => resolve_path(working_dir, p),
            None => working_dir.to_path_buf(),
        };

        if !base.exists() {
            return Err(Error::NotFound(format!(
                "base path does not exist: {}",
                base.display()
            )));
        }

        let options = ExpandOptions {
            case_sensitive: input.case_sensitive,
            follow_symlinks: input.follow_symlinks,
        };

        let mut found: HashMap<PathBuf, Candidate> = HashMap::new();
        for pattern in &input.patterns {
            let full = walk::clean_path(&resolve_path(&base, pattern).to_string_lossy());
            let full = full.to_string_lossy();
            debug!("glob: expanding '{}'", full);

            for path in walk::expand_glob(&full, options)? {
                if found.contains_key(&path) {
                    continue;
                }
                if let Some(candidate) =
                    Candidate::stat(&path, input.follow_symlinks, input.include_info)
                {
                    found.insert(path, candidate);
                }
            }
        }

        let mut candidates: Vec<Candidate> = found.into_values().collect();
        sort_candidates(&mut candidates, input.sort_by, input.sort_order);

        let matches: Vec<MatchEntry> = candidates.into_iter().map(|c| c.entry).collect();
        debug!("glob: {} unique matches", matches.len());

        Ok(GlobOutput {
            count: matches.len(),
            pattern: input.patterns.join(", "),
            matches,
        })
    }
}

impl Default for GlobTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GlobTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn meta(&self) -> ToolMeta {
        let def = Self::definition();
        ToolMeta::new(Self::NAME)
            .display_name("Glob")
            .description(def.description)
            .category("filesystem")
    }

    fn schema(&self) -> Value {
        Self::definition().schema()
    }

    fn validate(&self, input: &Value) -> Result<()> {
        Self::parse(input.clone()).map(|_| ())
    }

    async fn execute(&self, input: Value, context: &dyn ToolContext) -> Result<ToolResult> {
        let parsed = Self::parse(input)?;
        let output = Self::find(&parsed, context.working_dir())?;
        let payload = serde_json::to_value(&output)?;

        Ok(ToolResult::success(output.render()).with_metadata("result", payload))
    }
}

// ============================================================================
// Tests
// ============================================================================
