use std::path::PathBuf;

use thiserror::Error;

/// Workspace-wide error type.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A manifest file could not be read or parsed.
    #[error("{}: {}", .file.display(), .message)]
    Manifest { file: PathBuf, message: String },

    /// The backend-module list is malformed (duplicate or empty specifier,
    /// invalid export name). Raised before any text is emitted.
    #[error("invalid backend module list: {0}")]
    ModuleSpec(String),
}
