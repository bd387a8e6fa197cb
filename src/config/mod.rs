//! Configuration module for Page-Sweep
//!
//! This module handles loading, parsing, and validating sweep parameters,
//! either from a TOML file or assembled by the command line.
//!
//! # Example
//!
//! ```no_run
//! use page_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sweep.toml")).unwrap();
//! println!("Sweep will use {} workers", config.sweep.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, SweepConfig, DEFAULT_LENGTH, DEFAULT_SELECTOR, DEFAULT_URL_TEMPLATE, DEFAULT_WORKERS,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};

pub use validation::{validate, validate_sweep_config, MAX_WORKERS};
