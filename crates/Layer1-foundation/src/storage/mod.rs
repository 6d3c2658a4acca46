//! Storage module for Scout
//!
//! - `json`: JSON file load/save for settings

mod json;

pub use json::JsonStore;
