//! Core Traits - the uniform "invocable capability" interface
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Layer3-CLI                                                 │
//! │  └── decodes arguments, dispatches one tool                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Layer2-Tool                                                │
//! │  ├── Tool trait implementations (glob, grep, search)        │
//! │  └── ToolRegistry / RuntimeContext                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Layer1-Foundation (this layer)                             │
//! │  ├── Trait definitions (Tool, ToolContext)                  │
//! │  ├── Parameter schema builder                               │
//! │  └── Config + JSON store                                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

// ============================================================================
// Tool Trait
// ============================================================================

/// Tool metadata
#[derive(Debug, Clone)]
pub struct ToolMeta {
    /// Unique identifier
    pub name: String,
    /// Display name
    pub display_name: String,
    /// Description shown to the agent
    pub description: String,
    /// Category (filesystem, search, ...)
    pub category: String,
}

impl ToolMeta {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            description: String::new(),
            category: "general".to_string(),
        }
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn category(mut self, cat: impl Into<String>) -> Self {
        self.category = cat.into();
        self
    }
}

/// Result of a successful tool execution
///
/// `output` is the human-readable rendering; the structured payload lives in
/// `metadata` (the builtin tools store it under the `"result"` key).
#[derive(Debug, Clone)]
pub struct ToolExecutionResult {
    /// Whether execution was successful
    pub success: bool,
    /// Text output
    pub output: String,
    /// Error message (on failure)
    pub error: Option<String>,
    /// Additional metadata
    pub metadata: HashMap<String, Value>,
}

impl ToolExecutionResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error: None,
            metadata: HashMap::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: Some(message.into()),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Structured payload stored under `"result"`, if any
    pub fn payload(&self) -> Option<&Value> {
        self.metadata.get("result")
    }
}

pub type ToolResult = ToolExecutionResult;

/// Tool interface
///
/// Implemented by Layer2-tool. Every call is stateless: a tool must not carry
/// state from one `execute` to the next.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique identifier used by the registry
    fn name(&self) -> &str;

    /// Tool metadata
    fn meta(&self) -> ToolMeta;

    /// JSON schema of the parameters ("describe parameters")
    fn schema(&self) -> Value;

    /// Decode and validate parameters without touching the filesystem
    /// ("check parameters")
    fn validate(&self, input: &Value) -> Result<()>;

    /// Execute the tool
    ///
    /// # Arguments
    /// * `input` - JSON parameter payload
    /// * `context` - execution context (working directory, cancellation)
    async fn execute(&self, input: Value, context: &dyn ToolContext) -> Result<ToolResult>;
}

/// Tool execution context
pub trait ToolContext: Send + Sync {
    /// Directory relative paths are resolved against
    fn working_dir(&self) -> &Path;

    /// Session ID
    fn session_id(&self) -> &str;

    /// Whether the caller has asked to stop. Checked at capability boundaries only.
    fn is_cancelled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meta_builder() {
        let meta = ToolMeta::new("glob")
            .display_name("Glob")
            .description("find paths")
            .category("filesystem");
        assert_eq!(meta.name, "glob");
        assert_eq!(meta.display_name, "Glob");
        assert_eq!(meta.category, "filesystem");
    }

    #[test]
    fn test_result_payload() {
        let result = ToolResult::success("2 files").with_metadata("result", json!({"count": 2}));
        assert!(result.success);
        assert_eq!(result.payload().unwrap()["count"], 2);

        let err = ToolResult::error("boom");
        assert!(!err.success);
        assert!(err.payload().is_none());
    }
}
