// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for STL reading and writing.

use thiserror::Error;

/// Result type alias for codec operations.
pub type StlResult<T> = std::result::Result<T, StlError>;

/// Errors that can occur while reading or writing STL text.
#[derive(Debug, Error)]
pub enum StlError {
    /// Malformed input at a 1-based line number.
    #[error("line {line}: {message}")]
    Format { line: usize, message: String },

    /// A face operation failed while applying the given line.
    #[error("line {line}: {source}")]
    Face {
        line: usize,
        #[source]
        source: spacetime::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid codec configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl StlError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        StlError::Format {
            line,
            message: message.into(),
        }
    }

    /// Line the error was raised at, if it came from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            StlError::Format { line, .. } | StlError::Face { line, .. } => Some(*line),
            StlError::Io(_) | StlError::Config(_) => None,
        }
    }
}
