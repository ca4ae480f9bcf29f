//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// texpng - LaTeX formula to PNG renderer
///
/// Compiles a formula with latex and rasterizes the result with dvipng,
/// caching rendered images by content hash.
#[derive(Parser, Debug)]
#[command(name = "texpng")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "TEXPNG_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a formula to PNG
    Render(RenderArgs),

    /// Check that latex and dvipng are available
    Status,

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// LaTeX formula, without math delimiters
    pub formula: String,

    /// Output file (defaults to <work-dir>/<hash>.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output density in DPI
    #[arg(short, long)]
    pub density: Option<u32>,

    /// LaTeX package to declare (repeatable, replaces the default list)
    #[arg(short, long = "package")]
    pub packages: Vec<String>,

    /// Work directory for transient files and cached outputs
    #[arg(short, long)]
    pub work_dir: Option<PathBuf>,

    /// Re-render even if a cached image exists
    #[arg(long)]
    pub force: bool,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., render.density)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for the render command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Just the output path
    Plain,
    /// JSON object with path, hash and cache status
    Json,
}
