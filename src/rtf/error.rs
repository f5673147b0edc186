//! Error types for RTF parsing.

use std::fmt;

/// Result type for RTF codec operations.
pub type RtfResult<T> = Result<T, RtfError>;

/// RTF decoding errors.
///
/// Every variant detected while scanning source text carries the byte offset
/// at which the problem was found. Encoding is total and has no error type of
/// its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RtfError {
    /// Closing brace encountered with no group open
    UnmatchedGroupClose {
        /// Byte offset of the stray `}`
        offset: usize,
    },
    /// End of input reached inside an open group
    UnterminatedGroup {
        /// Byte offset of the unmatched `{`
        offset: usize,
    },
    /// Backslash not followed by any recognized escape form
    MalformedEscape {
        /// Byte offset of the `\`
        offset: usize,
    },
    /// Unicode escape whose digits overflow or name an invalid code point
    MalformedUnicodeEscape {
        /// Byte offset of the `\` introducing the escape
        offset: usize,
    },
    /// Odd length or non-hex character in an image byte run
    InvalidHexPayload {
        /// Byte offset into the reassembled payload run
        offset: usize,
    },
    /// Structurally invalid document
    MalformedDocument(String),
}

impl fmt::Display for RtfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtfError::UnmatchedGroupClose { offset } => {
                write!(f, "Unmatched group close at byte {}", offset)
            },
            RtfError::UnterminatedGroup { offset } => {
                write!(f, "Unterminated group opened at byte {}", offset)
            },
            RtfError::MalformedEscape { offset } => {
                write!(f, "Malformed escape at byte {}", offset)
            },
            RtfError::MalformedUnicodeEscape { offset } => {
                write!(f, "Malformed Unicode escape at byte {}", offset)
            },
            RtfError::InvalidHexPayload { offset } => {
                write!(f, "Invalid hex payload at byte {}", offset)
            },
            RtfError::MalformedDocument(msg) => {
                write!(f, "Malformed RTF document: {}", msg)
            },
        }
    }
}

impl std::error::Error for RtfError {}
