//! Unified error types for the Longan library.

use thiserror::Error;

/// Main error type for Longan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// RTF decode error
    #[error("RTF error: {0}")]
    Rtf(crate::rtf::RtfError),

    /// Document is well-formed but not a shape this library consumes
    #[error("Unsupported document: {0}")]
    Unsupported(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for Longan operations.
pub type Result<T> = std::result::Result<T, Error>;
