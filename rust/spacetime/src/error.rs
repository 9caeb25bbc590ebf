// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for collection and face operations.

use crate::face::Role;
use crate::key::SpatialKey;

/// Result type alias for spacetime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying collections.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No entry is registered under the spatial key.
    #[error("no entry at grid cell {0}")]
    NotFound(SpatialKey),

    /// No entry is registered under the caller-supplied key.
    #[error("no entry registered under the requested key")]
    KeyNotFound,

    /// The operation is not implemented or exceeds a fixed capacity.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// A child face lacks the vertex an attachment policy asked for.
    #[error("child face has no vertex {0}")]
    MissingVertex(Role),

    /// A configuration value falls outside its closed set.
    #[error("internal inconsistency: {0}")]
    Inconsistent(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn unsupported(message: impl Into<String>) -> Self {
        Error::Unsupported(message.into())
    }
}
