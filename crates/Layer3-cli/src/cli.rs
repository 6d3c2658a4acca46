//! Command-line definitions and their translation into tool parameters

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

/// Scout - filesystem pattern matching and content search
#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Working directory relative paths are resolved against
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Print the structured JSON payload instead of the text output
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find paths matching glob patterns
    Glob {
        /// Patterns such as '**/*.rs'
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Base directory for relative patterns
        #[arg(long)]
        path: Option<String>,

        /// Match case-insensitively
        #[arg(short, long)]
        ignore_case: bool,

        /// Descend into symlinked directories
        #[arg(short = 'L', long)]
        follow_symlinks: bool,

        #[arg(long, value_parser = ["name", "size", "modtime"])]
        sort_by: Option<String>,

        #[arg(long, value_parser = ["asc", "desc"])]
        sort_order: Option<String>,

        /// Include size, permissions and modification time
        #[arg(short = 'l', long)]
        info: bool,
    },

    /// Search files line by line
    Grep {
        pattern: String,

        /// Files or glob expressions
        #[arg(required = true)]
        files: Vec<String>,

        #[arg(short, long)]
        recursive: bool,

        #[arg(short, long)]
        ignore_case: bool,

        #[arg(short, long)]
        word_match: bool,

        #[arg(short = 'v', long)]
        invert_match: bool,

        #[arg(short = 'n', long)]
        line_numbers: bool,

        /// Only print statistics
        #[arg(short, long)]
        count: bool,

        #[arg(short, long, default_value_t = 0)]
        max_matches: i64,

        #[arg(long, value_parser = ["text", "json", "csv"], default_value = "text")]
        format: String,
    },

    /// Search a file or directory with context lines
    Search {
        pattern: String,

        #[arg(default_value = ".")]
        path: String,

        /// Only search these extensions (repeatable)
        #[arg(long)]
        include: Vec<String>,

        /// Skip these extensions (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        #[arg(short, long)]
        recursive: bool,

        #[arg(short, long)]
        ignore_case: bool,

        #[arg(short = 'C', long, default_value_t = 0)]
        context: i64,

        #[arg(short, long, default_value_t = 0)]
        max_results: i64,

        /// Glob applied to file names
        #[arg(long)]
        file_pattern: Option<String>,
    },

    /// List available tools and their parameter schemas
    Tools,

    /// Validate a JSON parameter payload without running the tool
    Check {
        tool: String,
        params: String,
    },
}

impl Command {
    /// Tool name and JSON parameters for commands that invoke a tool
    pub fn to_invocation(&self) -> Option<(&'static str, Value)> {
        match self {
            Command::Glob {
                patterns,
                path,
                ignore_case,
                follow_symlinks,
                sort_by,
                sort_order,
                info,
            } => {
                let mut params = json!({
                    "patterns": patterns,
                    "case_sensitive": !ignore_case,
                    "follow_symlinks": follow_symlinks,
                    "include_info": info,
                });
                if let Some(path) = path {
                    params["path"] = json!(path);
                }
                if let Some(sort_by) = sort_by {
                    params["sort_by"] = json!(sort_by);
                }
                if let Some(sort_order) = sort_order {
                    params["sort_order"] = json!(sort_order);
                }
                Some(("glob", params))
            }
            Command::Grep {
                pattern,
                files,
                recursive,
                ignore_case,
                word_match,
                invert_match,
                line_numbers,
                count,
                max_matches,
                format,
            } => Some((
                "grep",
                json!({
                    "pattern": pattern,
                    "files": files,
                    "recursive": recursive,
                    "ignore_case": ignore_case,
                    "word_match": word_match,
                    "invert_match": invert_match,
                    "line_numbers": line_numbers,
                    "count": count,
                    "max_matches": max_matches,
                    "output_format": format,
                }),
            )),
            Command::Search {
                pattern,
                path,
                include,
                exclude,
                recursive,
                ignore_case,
                context,
                max_results,
                file_pattern,
            } => {
                let mut params = json!({
                    "pattern": pattern,
                    "path": path,
                    "include": include,
                    "exclude": exclude,
                    "recursive": recursive,
                    "ignore_case": ignore_case,
                    "context": context,
                    "max_results": max_results,
                });
                if let Some(file_pattern) = file_pattern {
                    params["file_pattern"] = json!(file_pattern);
                }
                Some(("search", params))
            }
            Command::Tools | Command::Check { .. } => None,
        }
    }
}
