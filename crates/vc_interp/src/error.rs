use alloc::string::{String, ToString};

use serde_json::Value;
use thiserror::Error;

use crate::EntryKind;

// -----------------------------------------------------------------------------
// Error

/// Errors reported by the configuration and path-write surfaces.
///
/// Reads never fail: a placeholder that cannot be resolved contributes
/// nothing to its string instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Invalid placeholder pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Invalid path `{path}`: {message}")]
    InvalidPath { path: String, message: String },

    #[error("Index {index} is out of bounds for an array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Array cannot be indexed by key `{0}`")]
    InvalidIndex(String),

    #[error("Array length must be a non-negative integer, found {0}")]
    InvalidLength(Value),

    #[error("Path `{path}` leads to a {kind} entry, which has no properties")]
    NotAContainer { path: String, kind: EntryKind },
}

impl Error {
    #[cold]
    pub(crate) fn invalid_path(path: &str, message: impl ToString) -> Self {
        Self::InvalidPath {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
