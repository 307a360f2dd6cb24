//! Shared types, error model, and configuration for timelinegen.
//!
//! This crate is the foundation depended on by all other timelinegen crates.
//! It provides:
//! - [`TimelineError`] — the unified error type
//! - Domain types ([`Record`], [`Timeline`], [`TagSet`])
//! - Configuration ([`AppConfig`] and its sections, config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, InputConfig, MarkdownConfig, RenderConfig, SpliceConfig, config_dir,
    config_file_path, load_config, load_config_from,
};
pub use error::{Result, TimelineError};
pub use types::{Record, TagSet, Timeline};
