//! Core Module - tool interfaces and schema types
//!
//! - `traits.rs`: Tool, ToolContext, ToolMeta, ToolResult
//! - `schema.rs`: ToolDef and its builder for parameter schemas

pub mod schema;
pub mod traits;

pub use schema::{ToolDef, ToolDefBuilder, ToolParameters};
pub use traits::{Tool, ToolContext, ToolExecutionResult, ToolMeta, ToolResult};
