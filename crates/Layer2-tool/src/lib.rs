//! # scout-tool
//!
//! Filesystem pattern-matching and content-search tools:
//! - `glob`: resolve glob patterns (with recursive `**`) into deduplicated paths
//! - `grep`: line-by-line regex search over files and glob expressions
//! - `search`: regex search over a directory tree with context windows
//!
//! Each call is stateless and performs a fresh walk of the filesystem.

pub mod builtin;
pub mod context;
pub mod pattern;
pub mod registry;
pub mod types;
pub mod walk;

pub use context::RuntimeContext;
pub use registry::ToolRegistry;
pub use types::{GrepMatch, MatchEntry, SearchStatistics};

// Re-export builtin tools
pub use builtin::{
    glob::{GlobInput, GlobOutput, GlobTool, SortBy, SortOrder},
    grep::{GrepInput, GrepOutput, GrepQuery, GrepTool, OutputFormat},
    search::{SearchInput, SearchOutput, SearchQuery, SearchTool},
};
