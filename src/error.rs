//! # Error Types
//!
//! Unified error handling for stack rendering and output.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for pambase operations
pub type PambaseResult<T> = Result<T, PambaseError>;

/// Everything that can abort a generation run.
///
/// None of these are recovered locally: the first error ends the run.
#[derive(Debug, Error)]
pub enum PambaseError {
    #[error("Invalid usage: {0}")]
    Usage(String),

    #[error("Template '{name}' not found in {location}")]
    TemplateNotFound { name: String, location: String },

    #[error("Template error in '{name}': {source}")]
    Template {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output path {path} exists and is not a directory")]
    OutputNotDirectory { path: PathBuf },
}

impl PambaseError {
    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Create a template error for the named stack
    pub fn template(name: impl Into<String>, source: tera::Error) -> Self {
        Self::Template {
            name: name.into(),
            source,
        }
    }

    /// Create an IO error bound to the path that failed
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
