//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;

impl From<crate::rtf::RtfError> for Error {
    fn from(err: crate::rtf::RtfError) -> Self {
        Error::Rtf(err)
    }
}
