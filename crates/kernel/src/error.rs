//! Setup-phase error types.
//!
//! Accessor operations never fail; these errors only surface while content
//! types and configuration are being loaded.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while populating the content type registry.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid content type name: {0:?}")]
    InvalidTypeName(String),

    #[error("failed to read content types file {path}")]
    TypesFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed content types file")]
    TypesFileFormat(#[from] toml::de::Error),

    #[error("unknown subtitle format: {0:?}")]
    UnknownFormat(String),
}

/// Result type alias using SetupError.
pub type SetupResult<T> = Result<T, SetupError>;
