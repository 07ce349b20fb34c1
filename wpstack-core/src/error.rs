//! Error types for wpstack.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for wpstack operations.
pub type Result<T> = std::result::Result<T, WpstackError>;

/// Main error type for wpstack.
#[derive(Error, Debug)]
pub enum WpstackError {
    // Site errors
    #[error("Invalid site name '{name}': {reason}")]
    InvalidSiteName { name: String, reason: String },

    #[error("Site not found: {name}")]
    SiteNotFound { name: String },

    #[error("Corrupt site record at {path:?}: {reason}")]
    CorruptSiteRecord { path: PathBuf, reason: String },

    // Port allocation errors
    #[error("Host port pool exhausted: every site slot in the dedicated range is taken")]
    PortPoolExhausted,

    // Rendering errors
    #[error("Failed to render {artifact}: {reason}")]
    RenderFailed { artifact: String, reason: String },

    // Orchestrator errors
    #[error("Orchestrator not found: {hint}")]
    OrchestratorNotFound { hint: String },

    #[error("docker-compose {action} failed (exit code {code})")]
    OrchestratorFailed { action: String, code: i32 },

    // Configuration errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // File system errors
    #[error("I/O error at {path:?}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WpstackError {
    /// Wrap an I/O error with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError { path: path.into(), source }
    }
}
