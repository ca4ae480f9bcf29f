//! Error types for texpng
//!
//! All modules use `TexPngResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for texpng operations
pub type TexPngResult<T> = Result<T, TexPngError>;

/// All errors that can occur in texpng
#[derive(Error, Debug)]
pub enum TexPngError {
    // Workspace errors
    #[error("Temporary directory {path} was not created")]
    WorkDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write source document {path}")]
    DocumentWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Pipeline errors
    #[error("Unable to compile formula: missing latex binary or formula syntax error")]
    CompileFailed {
        /// Diagnostic lines captured from the compiler, may be empty
        diagnostics: String,
    },

    #[error("Unable to convert DVI to PNG: {reason}")]
    ConvertFailed { reason: String },

    #[error("{tool} did not finish within {secs}s")]
    ToolTimedOut { tool: String, secs: u64 },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl TexPngError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a compile failure carrying the filtered compiler diagnostics
    pub fn compile_failed(diagnostics: impl Into<String>) -> Self {
        Self::CompileFailed {
            diagnostics: diagnostics.into(),
        }
    }

    /// Create a convert failure
    pub fn convert_failed(reason: impl Into<String>) -> Self {
        Self::ConvertFailed {
            reason: reason.into(),
        }
    }

    /// Diagnostic lines attached to the error, if any
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Self::CompileFailed { diagnostics } if !diagnostics.is_empty() => Some(diagnostics),
            _ => None,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CompileFailed { .. } => {
                Some("Install LaTeX (e.g. texlive) or check the formula syntax")
            }
            Self::ConvertFailed { .. } => Some("Install dvipng (part of most TeX distributions)"),
            Self::WorkDirCreate { .. } => {
                Some("Check permissions on the work directory, or set render.work_dir")
            }
            Self::ToolTimedOut { .. } => Some("Raise or unset tools.timeout_secs"),
            _ => None,
        }
    }
}
