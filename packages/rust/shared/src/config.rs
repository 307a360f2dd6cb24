//! Application configuration for timelinegen.
//!
//! User config lives at `~/.timelinegen/timelinegen.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "timelinegen.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".timelinegen";

// ---------------------------------------------------------------------------
// Config structs (matching timelinegen.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input table settings.
    #[serde(default)]
    pub input: InputConfig,

    /// Fragment rendering settings.
    #[serde(default)]
    pub render: RenderConfig,

    /// Markdown body settings.
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Document splicing settings.
    #[serde(default)]
    pub splice: SpliceConfig,
}

/// `[input]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Field delimiter of the input table.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

fn default_delimiter() -> char {
    ','
}

/// `[render]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Emit the tag switch legend and per-tag CSS classes.
    #[serde(default = "default_true")]
    pub emit_tag_legend: bool,

    /// Suffix appended to a lowercased tag to form its CSS class.
    #[serde(default = "default_tag_class_suffix")]
    pub tag_class_suffix: String,

    /// Collapse characters outside `[a-z0-9_-]` in tag classes to `-`.
    #[serde(default)]
    pub sanitize_tag_classes: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            emit_tag_legend: true,
            tag_class_suffix: default_tag_class_suffix(),
            sanitize_tag_classes: false,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_tag_class_suffix() -> String {
    "-tag".into()
}

/// `[markdown]` section. Every extension is off by default (plain CommonMark).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkdownConfig {
    #[serde(default)]
    pub tables: bool,

    #[serde(default)]
    pub strikethrough: bool,

    #[serde(default)]
    pub footnotes: bool,

    #[serde(default)]
    pub smart_punctuation: bool,

    /// Drop raw HTML embedded in record content.
    #[serde(default)]
    pub filter_html: bool,
}

/// `[splice]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpliceConfig {
    /// Fail instead of warning when the document has no timeline region.
    #[serde(default)]
    pub strict: bool,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.timelinegen/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TimelineError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.timelinegen/timelinegen.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = match config_file_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(error = %e, "no home directory, using default config");
            return Ok(AppConfig::default());
        }
    };

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TimelineError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| TimelineError::config(format!("failed to parse {}: {e}", path.display())))
}
