//! Errors raised while reading and writing interchange files.
//!
//! Configuration errors live with the settings in [`crate::config`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of one interchange document.
#[derive(Error, Debug)]
pub enum XliffError {
    /// The document is not well-formed XML or not an xliff document.
    #[error("Malformed xliff{}: {message}", display_path(.path.as_ref()))]
    Format {
        /// File the document came from, when known.
        path: Option<PathBuf>,
        /// Parser message.
        message: String,
    },
    /// The `version` attribute names a schema this crate does not read.
    #[error("Unsupported xliff version: {0}")]
    UnsupportedVersion(String),
    /// Reading or writing the file failed.
    #[error("Failed to access xliff file: {0}")]
    Io(#[from] io::Error),
}

impl XliffError {
    /// A format error without a file path.
    #[must_use]
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format { path: None, message: message.into() }
    }

    /// Attaches `path` to a format error. Other variants are returned as is.
    #[must_use]
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Format { message, .. } => Self::Format { path: Some(path.into()), message },
            other => other,
        }
    }
}

impl From<roxmltree::Error> for XliffError {
    fn from(error: roxmltree::Error) -> Self {
        Self::format(error.to_string())
    }
}

/// Failure to set up a directory scan.
///
/// Per-file read and parse failures are not errors of the scan; they are
/// logged and the file is skipped.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// An exclude pattern is not a valid glob.
    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern {
        /// Pattern as configured.
        pattern: String,
        /// Glob parser message.
        message: String,
    },
    /// The exclude patterns could not be combined.
    #[error("Failed to build exclude patterns: {0}")]
    PatternSet(String),
}

/// ` in <path>` suffix for messages.
fn display_path(path: Option<&PathBuf>) -> String {
    path.map(|p| format!(" in {}", p.display())).unwrap_or_default()
}
