//! Search tool - regex search over a file or directory tree with context windows

use super::{decode, non_negative, resolve_path, string_or_list};
use crate::pattern::{compile_pattern, PatternFlags};
use crate::types::GrepMatch;
use crate::walk::{self, WalkOptions};
use async_trait::async_trait;
use regex::Regex;
use scout_foundation::{
    Error, Result, SearchSettings, Tool, ToolContext, ToolDef, ToolMeta, ToolResult,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, trace};

/// Search tool input
#[derive(Debug, Clone, Deserialize)]
pub struct SearchInput {
    /// Regular expression
    #[serde(alias = "regex")]
    pub pattern: String,

    /// File or directory to search
    #[serde(alias = "directory")]
    pub path: String,

    /// Only search files with these extensions
    #[serde(default, deserialize_with = "string_or_list")]
    pub include: Vec<String>,

    /// Skip files with these extensions
    #[serde(default, deserialize_with = "string_or_list")]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub recursive: bool,

    #[serde(default)]
    pub ignore_case: bool,

    /// Lines of context before and after each match
    #[serde(default)]
    pub context: i64,

    /// 0 = unlimited
    #[serde(default)]
    pub max_results: i64,

    /// Glob applied to file base names
    #[serde(default)]
    pub file_pattern: Option<String>,
}

/// Which files of a directory walk get scanned
#[derive(Debug, Clone, Default)]
struct FileFilter {
    name_pattern: Option<glob::Pattern>,
    include: Vec<String>,
    exclude: Vec<String>,
}

impl FileFilter {
    fn accepts(&self, path: &Path) -> bool {
        if let Some(pattern) = &self.name_pattern {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            if !pattern.matches(&name) {
                return false;
            }
        }

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());

        if !self.include.is_empty() {
            match &extension {
                Some(ext) if self.include.contains(ext) => {}
                _ => return false,
            }
        }

        match &extension {
            Some(ext) => !self.exclude.contains(ext),
            None => true,
        }
    }
}

/// Normalise an extension list entry: "RS", ".rs" and "rs" are the same
fn normalize_extensions(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().trim_start_matches('.').to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// A validated search request
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub input: SearchInput,
    pub regex: Regex,
    pub context: usize,
    pub max_results: usize,
    filter: FileFilter,
}

/// Search result payload
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutput {
    pub matches: Vec<GrepMatch>,
    pub files_scanned: usize,
    pub total_matches: usize,
}

/// Search tool
pub struct SearchTool {
    settings: SearchSettings,
}

impl SearchTool {
    pub fn new() -> Self {
        Self::with_settings(SearchSettings::default())
    }

    pub fn with_settings(settings: SearchSettings) -> Self {
        Self { settings }
    }

    /// Tool name
    pub const NAME: &'static str = "search";

    fn definition() -> ToolDef {
        ToolDef::builder(
            Self::NAME,
            "Search a file or directory for a regular expression. Returns each match \
             with line, column and optional surrounding context lines.",
        )
        .string_param("pattern", "Regular expression to search for", true)
        .string_param("path", "File or directory to search", true)
        .string_array_param(
            "include",
            "Only search files with these extensions (e.g. ['rs', 'toml'])",
            0,
            false,
        )
        .string_array_param("exclude", "Skip files with these extensions", 0, false)
        .boolean_param(
            "recursive",
            "Search subdirectories (default: direct children only)",
            false,
        )
        .boolean_param("ignore_case", "Case-insensitive matching", false)
        .integer_param(
            "context",
            "Lines of context to include before and after each match",
            0,
            false,
        )
        .integer_param(
            "max_results",
            "Maximum number of matches to return (0 = unlimited)",
            0,
            false,
        )
        .string_param(
            "file_pattern",
            "Glob applied to file names (e.g. '*_test.rs')",
            false,
        )
        .build()
    }

    /// Decode, validate and compile without touching the filesystem
    pub fn parse(input: Value) -> Result<SearchQuery> {
        let input: SearchInput = decode(input)?;

        if input.path.is_empty() {
            return Err(Error::validation("path must not be empty"));
        }
        let context = non_negative("context", input.context)?;
        let max_results = non_negative("max_results", input.max_results)?;
        let regex = compile_pattern(
            &input.pattern,
            PatternFlags {
                ignore_case: input.ignore_case,
                word_match: false,
            },
        )?;

        let name_pattern = input
            .file_pattern
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| {
                glob::Pattern::new(p).map_err(|e| {
                    Error::validation(format!("invalid file pattern '{}': {}", p, e))
                })
            })
            .transpose()?;

        let filter = FileFilter {
            name_pattern,
            include: normalize_extensions(&input.include),
            exclude: normalize_extensions(&input.exclude),
        };

        Ok(SearchQuery {
            input,
            regex,
            context,
            max_results,
            filter,
        })
    }

    /// Collect every match in one file's content
    fn scan_content(file: &str, content: &str, regex: &Regex, context: usize) -> Vec<GrepMatch> {
        let lines: Vec<&str> = content.lines().collect();
        let mut results = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let Some(found) = regex.find(line) else {
                continue;
            };

            let window = if context > 0 {
                let start = index.saturating_sub(context);
                let end = (index + context + 1).min(lines.len());
                lines[start..end].iter().map(|l| l.to_string()).collect()
            } else {
                Vec::new()
            };

            results.push(GrepMatch {
                file: file.to_string(),
                line: Some(index + 1),
                content: line.to_string(),
                captures: Vec::new(),
                column: Some(found.start() + 1),
                context: window,
            });
        }

        results
    }

    fn scan_file(&self, path: &Path, query: &SearchQuery) -> Vec<GrepMatch> {
        match walk::read_text_file(path, self.settings.file_size_limit()) {
            Some(content) => Self::scan_content(
                &path.display().to_string(),
                &content,
                &query.regex,
                query.context,
            ),
            None => Vec::new(),
        }
    }

    /// Run a validated query
    pub fn run(&self, query: &SearchQuery, working_dir: &Path) -> Result<SearchOutput> {
        let root = resolve_path(working_dir, &query.input.path);
        let metadata = fs::metadata(&root).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                Error::NotFound(format!("path does not exist: {}", root.display()))
            }
            _ => Error::tool_execution(Self::NAME, format!("{}: {}", root.display(), e)),
        })?;

        debug!(
            "search: pattern '{}' in {} (recursive: {})",
            query.regex.as_str(),
            root.display(),
            query.input.recursive
        );

        let limit = query.max_results;
        let mut matches = Vec::new();
        let mut files_scanned = 0;

        if metadata.is_file() {
            files_scanned = 1;
            matches = self.scan_file(&root, query);
        } else {
            let options = WalkOptions {
                follow_symlinks: false,
                max_depth: if query.input.recursive { None } else { Some(1) },
            };

            for entry in walk::walk_dir(&root, options)? {
                if limit > 0 && matches.len() >= limit {
                    debug!("search: max_results ({}) reached", limit);
                    break;
                }
                if !entry.file_type().is_some_and(|t| t.is_file()) {
                    trace!("search: skipping non-regular entry {}", entry.path().display());
                    continue;
                }
                if !query.filter.accepts(entry.path()) {
                    trace!("search: filtered out {}", entry.path().display());
                    continue;
                }

                files_scanned += 1;
                matches.extend(self.scan_file(entry.path(), query));
                if limit > 0 {
                    matches.truncate(limit);
                }
            }
        }

        if limit > 0 {
            matches.truncate(limit);
        }

        debug!(
            "search: {} matches in {} files scanned",
            matches.len(),
            files_scanned
        );

        Ok(SearchOutput {
            total_matches: matches.len(),
            files_scanned,
            matches,
        })
    }

    fn render(query: &SearchQuery, output: &SearchOutput) -> String {
        if output.matches.is_empty() {
            return format!(
                "No matches found for pattern '{}' ({} files scanned)",
                query.input.pattern, output.files_scanned
            );
        }

        let mut out = Vec::new();
        for m in &output.matches {
            let line = m.line.unwrap_or_default();
            out.push(format!(
                "{}:{}:{}: {}",
                m.file,
                line,
                m.column.unwrap_or_default(),
                m.content
            ));

            if !m.context.is_empty() {
                let first = line - query.context.min(line - 1);
                for (offset, text) in m.context.iter().enumerate() {
                    let number = first + offset;
                    let marker = if number == line { '>' } else { ' ' };
                    out.push(format!("  {}{:>5} | {}", marker, number, text));
                }
            }
        }

        out.push(format!(
            "\n{} matches in {} files scanned",
            output.total_matches, output.files_scanned
        ));
        out.join("\n")
    }
}

impl Default for SearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn meta(&self) -> ToolMeta {
        let def = Self::definition();
        ToolMeta::new(Self::NAME)
            .display_name("Search")
            .description(def.description)
            .category("search")
    }

    fn schema(&self) -> Value {
        Self::definition().schema()
    }

    fn validate(&self, input: &Value) -> Result<()> {
        Self::parse(input.clone()).map(|_| ())
    }

    async fn execute(&self, input: Value, context: &dyn ToolContext) -> Result<ToolResult> {
        let query = Self::parse(input)?;
        let output = self.run(&query, context.working_dir())?;
        let payload = serde_json::to_value(&output)?;

        Ok(ToolResult::success(Self::render(&query, &output)).with_metadata("result", payload))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RuntimeContext;
    use serde_json::json;
    use tempfile::TempDir;

    fn search(dir: &TempDir, input: Value) -> SearchOutput {
        let query = SearchTool::parse(input).unwrap();
        SearchTool::new().run(&query, dir.path()).unwrap()
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/util")).unwrap();
        fs::write(root.join("README.md"), "TODO: docs\n").unwrap();
        fs::write(root.join("main.rs"), "// TODO: top\n").unwrap();
        fs::write(root.join("src/lib.rs"), "// TODO: lib\n").unwrap();
        fs::write(root.join("src/lib_test.rs"), "// TODO: test\n").unwrap();
        fs::write(root.join("src/util/mod.rs"), "// TODO: util\n").unwrap();
        fs::write(root.join("src/Cargo.toml"), "# TODO: manifest\n").unwrap();
        dir
    }

    fn files(output: &SearchOutput) -> Vec<String> {
        let mut names: Vec<String> = output
            .matches
            .iter()
            .map(|m| {
                Path::new(&m.file)
                    .file_name()
                    .unwrap()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_meta_and_schema() {
        let tool = SearchTool::new();
        assert_eq!(tool.meta().name, "search");
        let schema = tool.schema();
        assert_eq!(schema["required"], json!(["pattern", "path"]));
        assert_eq!(schema["properties"]["context"]["minimum"], 0);
    }

    #[test]
    fn test_context_window() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("five.txt"), "one\ntwo\nneedle\nfour\nfive\n").unwrap();

        let output = search(
            &dir,
            json!({ "pattern": "needle", "path": "five.txt", "context": 1 }),
        );
        assert_eq!(output.matches.len(), 1);
        let hit = &output.matches[0];
        assert_eq!(hit.line, Some(3));
        assert_eq!(hit.context, vec!["two", "needle", "four"]);
    }

    #[test]
    fn test_context_window_clipped_at_edges() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("f.txt"), "needle\nb\nc\n").unwrap();

        let output = search(&dir, json!({ "pattern": "needle", "path": "f.txt", "context": 2 }));
        assert_eq!(output.matches[0].context, vec!["needle", "b", "c"]);
    }

    #[test]
    fn test_column_is_one_based() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("f.txt"), "abc needle needle\n").unwrap();

        let output = search(&dir, json!({ "pattern": "needle", "path": "f.txt" }));
        assert_eq!(output.matches.len(), 1);
        assert_eq!(output.matches[0].column, Some(5));
        assert!(output.matches[0].context.is_empty());
    }

    #[test]
    fn test_non_recursive_only_direct_children() {
        let dir = project();
        let output = search(&dir, json!({ "pattern": "TODO", "path": "." }));
        assert_eq!(files(&output), vec!["README.md", "main.rs"]);
        assert_eq!(output.files_scanned, 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_not_scanned() {
        let dir = project();
        std::os::unix::fs::symlink(dir.path().join("main.rs"), dir.path().join("alias.rs"))
            .unwrap();

        let output = search(&dir, json!({ "pattern": "TODO", "path": "." }));
        assert_eq!(files(&output), vec!["README.md", "main.rs"]);
        assert_eq!(output.files_scanned, 2);
    }

    #[test]
    fn test_recursive_with_include() {
        let dir = project();
        let output = search(
            &dir,
            json!({ "pattern": "TODO", "path": ".", "recursive": true, "include": ["rs"] }),
        );
        assert_eq!(
            files(&output),
            vec!["lib.rs", "lib_test.rs", "main.rs", "mod.rs"]
        );
    }

    #[test]
    fn test_exclude_extensions() {
        let dir = project();
        let output = search(
            &dir,
            json!({ "pattern": "TODO", "path": ".", "recursive": true, "exclude": [".RS", "md"] }),
        );
        assert_eq!(files(&output), vec!["Cargo.toml"]);
    }

    #[test]
    fn test_file_pattern() {
        let dir = project();
        let output = search(
            &dir,
            json!({ "pattern": "TODO", "path": ".", "recursive": true, "file_pattern": "*_test.rs" }),
        );
        assert_eq!(files(&output), vec!["lib_test.rs"]);
    }

    #[test]
    fn test_ignore_case() {
        let dir = project();
        let output = search(
            &dir,
            json!({ "pattern": "todo", "path": "main.rs", "ignore_case": true }),
        );
        assert_eq!(output.total_matches, 1);

        let output = search(&dir, json!({ "pattern": "todo", "path": "main.rs" }));
        assert_eq!(output.total_matches, 0);
    }

    #[test]
    fn test_max_results() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("f.txt"), "x1\nx2\nx3\nx4\nx5\n").unwrap();

        let output = search(&dir, json!({ "pattern": "x", "path": "f.txt", "max_results": 2 }));
        assert_eq!(output.matches.len(), 2);
        assert_eq!(output.total_matches, 2);
    }

    #[test]
    fn test_max_results_stops_walk() {
        let dir = project();
        let output = search(
            &dir,
            json!({ "pattern": "TODO", "path": ".", "recursive": true, "max_results": 1 }),
        );
        assert_eq!(output.total_matches, 1);
        assert_eq!(output.files_scanned, 1);
    }

    #[test]
    fn test_missing_path() {
        let dir = project();
        let query = SearchTool::parse(json!({ "pattern": "x", "path": "missing" })).unwrap();
        let err = SearchTool::new().run(&query, dir.path()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_validation_errors() {
        let bad_regex = SearchTool::parse(json!({ "pattern": "(", "path": "." }));
        assert!(bad_regex.unwrap_err().is_validation());

        let negative = SearchTool::parse(json!({ "pattern": "x", "path": ".", "context": -2 }));
        assert!(negative.unwrap_err().is_validation());

        let bad_glob = SearchTool::parse(json!({ "pattern": "x", "path": ".", "file_pattern": "[" }));
        assert!(bad_glob.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_execute_renders_context() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("f.txt"), "a\nneedle\nc\n").unwrap();
        let ctx = RuntimeContext::new("test", dir.path().to_path_buf());

        let result = SearchTool::new()
            .execute(json!({ "pattern": "needle", "path": "f.txt", "context": 1 }), &ctx)
            .await
            .unwrap();

        assert!(result.output.contains(":2:1: needle"));
        assert!(result.output.contains(">    2 | needle"));
        assert_eq!(result.payload().unwrap()["total_matches"], 1);
    }
}
