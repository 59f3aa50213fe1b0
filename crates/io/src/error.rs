use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing PLY files.
#[derive(Debug, Error)]
pub enum PlyError {
    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// Anything other than `format ascii 1.0`, or list properties on vertices.
    #[error("unsupported PLY format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid PLY data: {0}")]
    InvalidData(String),
}
