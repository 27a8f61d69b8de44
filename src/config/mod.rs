//! Configuration module for callnotes
//!
//! Handles loading and managing application settings from TOML files.

mod settings;

pub use settings::{parse_team_names, Settings};
