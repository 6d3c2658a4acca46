//! Config - settings management
//!
//! - `scout.rs` - ScoutConfig (global + project merge) and SearchSettings

mod scout;

pub use scout::{ScoutConfig, SearchSettings, DEFAULT_MAX_FILE_SIZE, SCOUT_CONFIG_FILE};
