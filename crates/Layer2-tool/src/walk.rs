//! Directory walking and glob expansion shared by the builtin tools
//!
//! `glob` and `grep` both expand patterns through [`expand_glob`], so recursive
//! `**` handling (empty suffix, symlink skipping, root exclusion) is identical for
//! the two. `search` walks directories through [`walk_dir`].

use glob::{MatchOptions, Pattern};
use ignore::{DirEntry, WalkBuilder};
use scout_foundation::{Error, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};

/// The recursive-directory marker
const RECURSIVE_MARKER: &str = "**";

/// Options for a directory walk
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Descend into symlinked directories
    pub follow_symlinks: bool,
    /// Maximum depth below the root (`Some(1)` = direct children only)
    pub max_depth: Option<usize>,
}

/// Options for glob expansion
#[derive(Debug, Clone, Copy)]
pub struct ExpandOptions {
    pub case_sensitive: bool,
    pub follow_symlinks: bool,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            follow_symlinks: false,
        }
    }
}

impl ExpandOptions {
    fn match_options(&self) -> MatchOptions {
        MatchOptions {
            case_sensitive: self.case_sensitive,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        }
    }
}

/// A pattern of the form `<root>/**/<suffix>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecursivePattern {
    /// Walk root (the cleaned segment before `**`)
    pub root: PathBuf,
    /// Matched against each trailing part of the root-relative path; empty matches all
    pub suffix: String,
}

impl RecursivePattern {
    /// Split a pattern around `**`.
    ///
    /// Returns `Ok(None)` for patterns without `**` and a validation error when
    /// `**` appears more than once.
    pub fn parse(pattern: &str) -> Result<Option<Self>> {
        if !pattern.contains(RECURSIVE_MARKER) {
            return Ok(None);
        }

        let parts: Vec<&str> = pattern.split(RECURSIVE_MARKER).collect();
        if parts.len() != 2 {
            return Err(Error::validation(format!(
                "invalid recursive pattern '{}': '**' may appear only once",
                pattern
            )));
        }

        let root = clean_path(parts[0]);
        let suffix = parts[1]
            .trim_start_matches(|c| c == '/' || c == std::path::MAIN_SEPARATOR)
            .to_string();

        Ok(Some(Self { root, suffix }))
    }
}

/// Lexically normalise a path: drop `.` components, resolve `..` against preceding
/// components, strip trailing separators. An empty result becomes `.`.
pub fn clean_path(raw: &str) -> PathBuf {
    let mut out = PathBuf::new();
    for component in Path::new(raw).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Whether a path expression contains glob wildcard characters
pub fn has_wildcard(expr: &str) -> bool {
    expr.contains(['*', '?', '['])
}

/// Walk every entry below `root` (the root itself is not yielded).
///
/// Entries are visited in file-name order. Entries that cannot be read are skipped;
/// only a root that cannot be opened is an error.
pub fn walk_dir(root: &Path, options: WalkOptions) -> Result<impl Iterator<Item = DirEntry>> {
    if let Err(e) = fs::read_dir(root) {
        return Err(Error::Io(std::io::Error::new(
            e.kind(),
            format!("cannot read directory {}: {}", root.display(), e),
        )));
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(options.follow_symlinks)
        .max_depth(options.max_depth)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    Ok(walker
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                trace!("skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.depth() > 0))
}

/// Expand a `<root>/**/<suffix>` pattern by walking `root` recursively.
///
/// A root that does not exist (or is not a directory) expands to nothing.
pub fn expand_recursive_glob(pattern: &str, options: ExpandOptions) -> Result<Vec<PathBuf>> {
    let Some(recursive) = RecursivePattern::parse(pattern)? else {
        return Err(Error::validation(format!(
            "pattern '{}' has no '**' segment",
            pattern
        )));
    };

    let matcher = if recursive.suffix.is_empty() {
        None
    } else {
        Some(Pattern::new(&recursive.suffix).map_err(|e| {
            Error::tool_execution("glob", format!("invalid pattern '{}': {}", pattern, e))
        })?)
    };

    if !recursive.root.is_dir() {
        debug!("recursive glob root {} is not a directory", recursive.root.display());
        return Ok(Vec::new());
    }

    let match_options = options.match_options();
    let walk_options = WalkOptions {
        follow_symlinks: options.follow_symlinks,
        max_depth: None,
    };

    let mut results = Vec::new();
    for entry in walk_dir(&recursive.root, walk_options)? {
        let path = entry.path();
        let matched = match &matcher {
            None => true,
            Some(matcher) => {
                let relative = path
                    .strip_prefix(&recursive.root)
                    .map(to_slash)
                    .unwrap_or_default();
                let hit = tails(&relative).any(|tail| matcher.matches_with(tail, match_options));
                hit
            }
        };

        if matched {
            results.push(path.to_path_buf());
        }
    }

    trace!("'{}' expanded to {} paths", pattern, results.len());
    Ok(results)
}

/// Expand any glob pattern: `**` patterns walk recursively, others expand a single
/// level through the `glob` crate. Unreadable matches are skipped.
pub fn expand_glob(pattern: &str, options: ExpandOptions) -> Result<Vec<PathBuf>> {
    if pattern.contains(RECURSIVE_MARKER) {
        return expand_recursive_glob(pattern, options);
    }

    let paths = glob::glob_with(pattern, options.match_options()).map_err(|e| {
        Error::tool_execution("glob", format!("invalid pattern '{}': {}", pattern, e))
    })?;

    Ok(paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                trace!("skipping unreadable glob match: {}", e);
                None
            }
        })
        .collect())
}

/// Read a file as UTF-8 text.
///
/// Returns `None` for files that cannot be read, exceed `max_size`, or are not
/// valid UTF-8.
pub fn read_text_file(path: &Path, max_size: u64) -> Option<String> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.len() > max_size => {
            debug!(
                "skipping {} ({} bytes exceeds limit of {})",
                path.display(),
                metadata.len(),
                max_size
            );
            return None;
        }
        Ok(_) => {}
        Err(e) => {
            debug!("skipping {}: {}", path.display(), e);
            return None;
        }
    }

    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            debug!("skipping {}: {}", path.display(), e);
            None
        }
    }
}

/// Every component-aligned tail of a `/`-separated path, longest first.
/// `a/b/c` yields `a/b/c`, `b/c` and `c`.
fn tails(relative: &str) -> impl Iterator<Item = &str> {
    std::iter::once(relative).chain(
        relative
            .match_indices('/')
            .map(move |(i, _)| &relative[i + 1..]),
    )
}

/// Render a relative path with `/` separators
fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
