//! Tool Registry - name-based dispatch over the available tools

use crate::builtin::{glob::GlobTool, grep::GrepTool, search::SearchTool};
use scout_foundation::{Error, Result, ScoutConfig, SearchSettings, Tool, ToolContext, ToolResult};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry of available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry with the builtin tools and default settings
    pub fn with_builtins() -> Self {
        Self::with_settings(SearchSettings::default())
    }

    /// Registry with the builtin tools configured from `config`
    pub fn from_config(config: &ScoutConfig) -> Self {
        Self::with_settings(config.search.clone())
    }

    fn with_settings(settings: SearchSettings) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(GlobTool::new()));
        registry.register(Arc::new(GrepTool::with_settings(settings.clone())));
        registry.register(Arc::new(SearchTool::with_settings(settings)));
        registry
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            warn!("tool '{}' re-registered", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in alphabetical order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Parameter schemas of every tool, for discovery by the agent
    pub fn schemas(&self) -> Vec<Value> {
        self.names()
            .into_iter()
            .filter_map(|name| self.tools.get(name))
            .map(|tool| {
                let meta = tool.meta();
                json!({
                    "name": meta.name,
                    "description": meta.description,
                    "category": meta.category,
                    "parameters": tool.schema(),
                })
            })
            .collect()
    }

    fn lookup(&self, name: &str) -> Result<Arc<dyn Tool>> {
        self.get(name)
            .ok_or_else(|| Error::ToolNotFound(name.to_string()))
    }

    /// Check parameters without executing
    pub fn validate(&self, name: &str, params: &Value) -> Result<()> {
        self.lookup(name)?.validate(params)
    }

    /// Execute a tool by name
    pub async fn execute(
        &self,
        name: &str,
        params: Value,
        ctx: &dyn ToolContext,
    ) -> Result<ToolResult> {
        let tool = self.lookup(name)?;
        if ctx.is_cancelled() {
            debug!("tool '{}' not started: context cancelled", name);
            return Err(Error::Cancelled);
        }

        debug!("executing tool '{}' (session {})", name, ctx.session_id());
        let result = tool.execute(params, ctx).await;
        if let Err(e) = &result {
            debug!("tool '{}' failed: {}", name, e);
        }
        result
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
