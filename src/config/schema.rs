//! Configuration schema for texpng
//!
//! Configuration is stored at `~/.config/texpng/config.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// External tool settings
    pub tools: ToolsConfig,

    /// Render pipeline settings
    pub render: RenderConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Paths and limits for the external tools
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// LaTeX compiler executable
    pub latex: PathBuf,

    /// DVI-to-PNG converter executable
    pub dvipng: PathBuf,

    /// Bound each tool invocation to this many seconds. Unset = wait
    /// indefinitely, matching the historical behavior.
    pub timeout_secs: Option<u64>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            latex: PathBuf::from("/usr/bin/latex"),
            dvipng: PathBuf::from("/usr/bin/dvipng"),
            timeout_secs: None,
        }
    }
}

/// Render pipeline defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output density (DPI) passed to the converter
    pub density: u32,

    /// Directory for transient files and default-named outputs
    pub work_dir: PathBuf,

    /// LaTeX packages declared in the generated document, in order
    pub packages: Vec<String>,
}

impl RenderConfig {
    /// The standard math/graphics package list
    pub fn default_packages() -> Vec<String> {
        ["amssymb,amsmath", "color", "amsfonts", "amssymb", "pst-plot"]
            .into_iter()
            .map(String::from)
            .collect()
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            density: 155,
            work_dir: PathBuf::from("/tmp"),
            packages: Self::default_packages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_tooling() {
        let config = Config::default();

        assert_eq!(config.tools.latex, PathBuf::from("/usr/bin/latex"));
        assert_eq!(config.tools.dvipng, PathBuf::from("/usr/bin/dvipng"));
        assert_eq!(config.tools.timeout_secs, None);
        assert_eq!(config.render.density, 155);
        assert_eq!(config.render.work_dir, PathBuf::from("/tmp"));
        assert_eq!(config.render.packages.len(), 5);
        assert_eq!(config.render.packages[0], "amssymb,amsmath");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[render]\ndensity = 300\n").unwrap();

        assert_eq!(config.render.density, 300);
        assert_eq!(config.render.work_dir, PathBuf::from("/tmp"));
        assert_eq!(config.tools.latex, PathBuf::from("/usr/bin/latex"));
    }
}
