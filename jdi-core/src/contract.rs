//! # contract: shared types and the seam between batch runs and the filesystem
//!
//! This module defines the error type of the file layer, the report of one
//! written document, and the [`Documenter`] trait that turns a source path
//! into a Markdown file next to it.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall`, so batch runs can be tested
//!   without touching the disk.
//!
//! ## Errors
//! The transform itself cannot fail. Everything here comes from reading the
//! source, writing the destination, or a worker task dying.

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Report of one generated Markdown file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDoc {
    /// The source file that was documented.
    pub source: PathBuf,
    /// Where the Markdown was written (`<source>.md`).
    pub destination: PathBuf,
    pub bytes_written: u64,
}

#[derive(Debug)]
pub enum DocError {
    Io(std::io::Error),
    /// The source holds bytes that are not UTF-8. `line` is 1-based.
    InvalidUtf8 { path: PathBuf, line: usize },
    /// A worker task panicked or was cancelled.
    Join(tokio::task::JoinError),
}

impl fmt::Display for DocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocError::Io(e) => write!(f, "I/O error: {e}"),
            DocError::InvalidUtf8 { path, line } => {
                write!(f, "{}:{line}: line is not valid UTF-8", path.display())
            }
            DocError::Join(e) => write!(f, "document task failed: {e}"),
        }
    }
}

impl std::error::Error for DocError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocError::Io(e) => Some(e),
            DocError::InvalidUtf8 { .. } => None,
            DocError::Join(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for DocError {
    fn from(e: std::io::Error) -> Self {
        DocError::Io(e)
    }
}

impl From<tokio::task::JoinError> for DocError {
    fn from(e: tokio::task::JoinError) -> Self {
        DocError::Join(e)
    }
}

/// Documents a single source file.
/// Implemented by [`crate::document::FileDocumenter`] and by mocks in tests.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Documenter: Send + Sync {
    /// Writes the Markdown for `source` and reports where it went.
    async fn document(&self, source: PathBuf) -> Result<WrittenDoc, DocError>;
}
