//! Error types for the library layer.
//!
//! Search failures use [`kokkai_api::Error`] throughout. The types here only
//! describe why a cache write did not happen; callers of the search API never
//! see them.

use std::fmt;

/// A cache write that did not complete.
#[derive(Debug)]
pub enum CacheError {
    /// Creating the directory or writing the entry failed.
    Io(std::io::Error),
    /// The page could not be serialized.
    Serialization(serde_json::Error),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Cache I/O error: {}", e),
            Self::Serialization(e) => write!(f, "Cache serialization error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Serialization(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
