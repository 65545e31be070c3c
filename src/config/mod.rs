//! Configuration module for adsift
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files.
//!
//! # Example
//!
//! ```no_run
//! use adsift::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Searching around: {}, {}", config.search.city, config.search.state);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, OutputConfig, SearchConfig, VpnConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
