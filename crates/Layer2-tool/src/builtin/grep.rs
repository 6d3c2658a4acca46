//! Grep tool - line-oriented regex search over an explicit file list
//!
//! File entries may be literal paths or glob expressions; glob expressions are
//! expanded through the same `**`-aware expansion used by the glob tool.

use super::{decode, non_negative, resolve_path, string_or_list};
use crate::pattern::{compile_pattern, PatternFlags};
use crate::types::{GrepMatch, SearchStatistics};
use crate::walk::{self, ExpandOptions, RecursivePattern, WalkOptions};
use async_trait::async_trait;
use regex::Regex;
use scout_foundation::{
    Error, Result, SearchSettings, Tool, ToolContext, ToolDef, ToolMeta, ToolResult,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Rendering of the text output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Grep tool input
#[derive(Debug, Clone, Deserialize)]
pub struct GrepInput {
    /// Regular expression
    #[serde(alias = "regex")]
    pub pattern: String,

    /// Files or glob expressions
    #[serde(deserialize_with = "string_or_list")]
    pub files: Vec<String>,

    /// Walk directories named in `files`
    #[serde(default)]
    pub recursive: bool,

    #[serde(default)]
    pub ignore_case: bool,

    #[serde(default)]
    pub word_match: bool,

    /// Report lines that do not match
    #[serde(default)]
    pub invert_match: bool,

    #[serde(default)]
    pub line_numbers: bool,

    /// Omit the match list, keep statistics
    #[serde(default)]
    pub count: bool,

    /// 0 = unlimited
    #[serde(default)]
    pub max_matches: i64,

    #[serde(default)]
    pub output_format: OutputFormat,
}

/// A validated grep request
#[derive(Debug, Clone)]
pub struct GrepQuery {
    pub input: GrepInput,
    pub regex: Regex,
    pub max_matches: usize,
}

/// Grep result payload
#[derive(Debug, Clone, Serialize)]
pub struct GrepOutput {
    pub matches: Vec<GrepMatch>,
    pub statistics: SearchStatistics,
    /// Number of matches after truncation
    pub total: usize,
}

/// Grep tool
pub struct GrepTool {
    settings: SearchSettings,
}

impl GrepTool {
    pub fn new() -> Self {
        Self::with_settings(SearchSettings::default())
    }

    pub fn with_settings(settings: SearchSettings) -> Self {
        Self { settings }
    }

    /// Tool name
    pub const NAME: &'static str = "grep";

    fn definition() -> ToolDef {
        ToolDef::builder(
            Self::NAME,
            "Search files line by line for a regular expression. Returns matching lines \
             with optional line numbers and capture groups, plus match statistics.",
        )
        .string_param("pattern", "Regular expression to search for", true)
        .string_array_param(
            "files",
            "Files or glob expressions (e.g. 'src/**/*.rs') to search",
            1,
            true,
        )
        .boolean_param(
            "recursive",
            "Search all files below directories listed in 'files'",
            false,
        )
        .boolean_param("ignore_case", "Case-insensitive matching", false)
        .boolean_param("word_match", "Match whole words only", false)
        .boolean_param("invert_match", "Return lines that do NOT match", false)
        .boolean_param("line_numbers", "Include 1-based line numbers", false)
        .boolean_param("count", "Return only statistics, not the matches", false)
        .integer_param(
            "max_matches",
            "Maximum number of matches to return (0 = unlimited)",
            0,
            false,
        )
        .enum_param(
            "output_format",
            "Text output format (default: text)",
            &["text", "json", "csv"],
            false,
        )
        .build()
    }

    /// Decode, validate and compile without touching the filesystem
    pub fn parse(input: Value) -> Result<GrepQuery> {
        let input: GrepInput = decode(input)?;

        if input.files.is_empty() {
            return Err(Error::validation("at least one file is required"));
        }
        for entry in input.files.iter().filter(|f| walk::has_wildcard(f)) {
            RecursivePattern::parse(entry)?;
        }
        let max_matches = non_negative("max_matches", input.max_matches)?;
        let regex = compile_pattern(
            &input.pattern,
            PatternFlags {
                ignore_case: input.ignore_case,
                word_match: input.word_match,
            },
        )?;

        Ok(GrepQuery {
            input,
            regex,
            max_matches,
        })
    }

    /// Expand the `files` list into concrete file paths, first occurrence wins
    fn collect_files(input: &GrepInput, working_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();
        let mut push = |path: PathBuf| {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        };

        for entry in &input.files {
            let resolved = resolve_path(working_dir, entry);

            if walk::has_wildcard(entry) {
                let expanded =
                    walk::expand_glob(&resolved.to_string_lossy(), ExpandOptions::default())?;
                for path in expanded.into_iter().filter(|p| !p.is_dir()) {
                    push(path);
                }
            } else if resolved.is_dir() {
                if !input.recursive {
                    debug!("grep: skipping directory {} (not recursive)", resolved.display());
                    continue;
                }
                for dir_entry in walk::walk_dir(&resolved, WalkOptions::default())? {
                    if dir_entry.file_type().is_some_and(|t| t.is_file()) {
                        push(dir_entry.into_path());
                    }
                }
            } else {
                push(resolved);
            }
        }

        Ok(files)
    }

    /// Scan the files of a validated query
    pub fn run(&self, query: &GrepQuery, working_dir: &Path) -> Result<GrepOutput> {
        let input = &query.input;
        let files = Self::collect_files(input, working_dir)?;
        debug!(
            "grep: pattern '{}' over {} files",
            query.regex.as_str(),
            files.len()
        );

        let mut matches = Vec::new();
        // Frequency key of each entry in `matches`
        let mut keys: Vec<String> = Vec::new();
        let mut statistics = SearchStatistics::default();

        for file in &files {
            if query.max_matches > 0 && matches.len() >= query.max_matches {
                debug!("grep: max_matches ({}) reached", query.max_matches);
                break;
            }

            statistics.files_searched += 1;
            let Some(content) = walk::read_text_file(file, self.settings.file_size_limit()) else {
                continue;
            };

            let display = file.display().to_string();
            let mut file_hits = 0;
            for (index, line) in content.lines().enumerate() {
                let captures = query.regex.captures(line);
                if captures.is_some() == input.invert_match {
                    continue;
                }

                let groups: Vec<String> = captures
                    .as_ref()
                    .map(|caps| {
                        caps.iter()
                            .skip(1)
                            .map(|g| g.map(|m| m.as_str().to_string()).unwrap_or_default())
                            .collect()
                    })
                    .unwrap_or_default();

                let key = captures
                    .as_ref()
                    .and_then(|caps| caps.get(1))
                    .map_or(line, |m| m.as_str());
                keys.push(key.to_string());
                file_hits += 1;

                matches.push(GrepMatch {
                    file: display.clone(),
                    line: input.line_numbers.then_some(index + 1),
                    content: line.to_string(),
                    captures: groups,
                    column: None,
                    context: Vec::new(),
                });
            }

            if file_hits > 0 {
                statistics.files_matched += 1;
            }
        }

        if query.max_matches > 0 {
            matches.truncate(query.max_matches);
            keys.truncate(query.max_matches);
        }
        for key in &keys {
            statistics.record(key);
        }
        let total = matches.len();
        if input.count {
            matches.clear();
        }

        debug!(
            "grep: {} matches in {}/{} files",
            statistics.total_matches, statistics.files_matched, statistics.files_searched
        );

        Ok(GrepOutput {
            matches,
            statistics,
            total,
        })
    }

    fn render(query: &GrepQuery, output: &GrepOutput) -> Result<String> {
        let input = &query.input;
        let stats = &output.statistics;

        let text = match input.output_format {
            OutputFormat::Json => serde_json::to_string_pretty(output)?,
            OutputFormat::Csv if input.count => format!(
                "files_searched,files_matched,total_matches\n{},{},{}",
                stats.files_searched, stats.files_matched, stats.total_matches
            ),
            OutputFormat::Csv => {
                let mut rows = vec!["file,line,content".to_string()];
                rows.extend(output.matches.iter().map(|m| {
                    format!(
                        "{},{},{}",
                        csv_field(&m.file),
                        m.line.map(|n| n.to_string()).unwrap_or_default(),
                        csv_field(&m.content)
                    )
                }));
                rows.join("\n")
            }
            OutputFormat::Text if input.count => format!(
                "{} matches in {} of {} files searched",
                output.total, stats.files_matched, stats.files_searched
            ),
            OutputFormat::Text if output.matches.is_empty() => {
                format!("No matches found for pattern '{}'", input.pattern)
            }
            OutputFormat::Text => output
                .matches
                .iter()
                .map(|m| match m.line {
                    Some(line) => format!("{}:{}:{}", m.file, line, m.content),
                    None => format!("{}:{}", m.file, m.content),
                })
                .collect::<Vec<_>>()
                .join("\n"),
        };

        Ok(text)
    }
}

/// Quote a CSV field when it contains a delimiter, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

impl Default for GrepTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GrepTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn meta(&self) -> ToolMeta {
        let def = Self::definition();
        ToolMeta::new(Self::NAME)
            .display_name("Grep")
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
        let text = Self::render(&query, &output)?;
        let payload = serde_json::to_value(&output)?;

        Ok(ToolResult::success(text).with_metadata("result", payload))
    }
}

// ============================================================================
// Tests
// ============================================================================
