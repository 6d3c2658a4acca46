//! # scout-foundation
//!
//! Foundation layer for Scout:
//! - Core: the `Tool` / `ToolContext` traits and the parameter-schema builder
//! - Config: `ScoutConfig` merged from global and project stores
//! - Storage: `JsonStore` for settings files
//! - Error: the shared `Error` / `Result` types

pub mod config;
pub mod core;
pub mod error;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Core
// ============================================================================
pub use self::core::{
    Tool, ToolContext, ToolDef, ToolDefBuilder, ToolExecutionResult, ToolMeta, ToolParameters,
    ToolResult,
};

// ============================================================================
// Config
// ============================================================================
pub use config::{ScoutConfig, SearchSettings, DEFAULT_MAX_FILE_SIZE, SCOUT_CONFIG_FILE};

// ============================================================================
// Storage
// ============================================================================
pub use storage::JsonStore;
