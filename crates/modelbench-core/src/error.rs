// Dweve ModelBench - Model Repository Benchmark Harness
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for model repository benchmarking.
//!
//! Two layers of errors exist: [`RepositoryError`] is what a backend reports
//! when one of its own operations fails, and [`BenchError`] is what the
//! harness reports to its callers (invalid configuration, infeasible model
//! shapes, unknown repositories, failed trials).

use thiserror::Error;

/// Maximum number of nodes a generated model may contain (10 million).
///
/// Requests above this limit are rejected before any allocation happens.
pub const MAX_MODEL_SIZE: usize = 10_000_000;

/// Maximum depth of a generated model.
///
/// Model consumers walk trees recursively in places (serialization, drop),
/// so very deep chains are rejected up front.
pub const MAX_MODEL_DEPTH: usize = 4_096;

/// Result type for benchmarking operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors raised by a model repository backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The operation needs a running repository.
    #[error("repository '{0}' is not running")]
    NotRunning(String),

    /// No resource is stored under the requested URI.
    #[error("resource '{0}' not found")]
    ResourceNotFound(String),

    /// Backend specific failure.
    #[error("backend failure: {0}")]
    Backend(String),

    /// I/O failure while touching persisted state.
    #[error("I/O error: {0}")]
    Io(String),

    /// Resource contents could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// Errors that can occur during benchmarking operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// Invalid configuration parameter
    #[error("Invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The requested model shape cannot hold the requested node count.
    #[error(
        "Is not possible to generate a model with the given properties: max is {max} and count is set to {count}"
    )]
    InfeasibleModel {
        /// Requested node count
        count: usize,
        /// Maximum tree size for the requested width and depth
        max: u128,
    },

    /// Model size or depth exceeds the hard limits.
    #[error("Model {dimension} {requested} exceeds maximum allowed limit of {max}")]
    ModelTooLarge {
        /// Which dimension overflowed ("size" or "depth")
        dimension: &'static str,
        /// Requested value
        requested: usize,
        /// Maximum allowed value
        max: usize,
    },

    /// No registered repository carries the given name.
    #[error("Could not find a registered repository with name \"{0}\"")]
    UnknownRepository(String),

    /// The repository is registered but cannot be reached.
    #[error("Repository \"{0}\" is registered but not available")]
    RepositoryUnavailable(String),

    /// A repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A case hook returned an error.
    #[error("Case '{case}' failed: {reason}")]
    CaseFailed {
        /// Case name
        case: String,
        /// Failure description
        reason: String,
    },

    /// A case hook panicked.
    #[error("Case '{case}' panicked: {message}")]
    CasePanicked {
        /// Case name
        case: String,
        /// Panic payload, when it was a string
        message: String,
    },

    /// The meter was queried before a start/stop pair completed.
    #[error("Meter has not completed a start/stop cycle")]
    MeterNotStopped,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Model (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for BenchError {
    fn from(err: std::io::Error) -> Self {
        BenchError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::Serialization(err.to_string())
    }
}

impl BenchError {
    /// Shorthand for [`BenchError::InvalidConfig`].
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        BenchError::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

/// Validate that a model size is within acceptable limits
///
/// # Examples
///
/// ```
/// use modelbench_core::error::{validate_model_size, MAX_MODEL_SIZE};
///
/// assert!(validate_model_size(1000).is_ok());
/// assert!(validate_model_size(MAX_MODEL_SIZE + 1).is_err());
/// ```
#[inline]
pub fn validate_model_size(count: usize) -> Result<()> {
    if count > MAX_MODEL_SIZE {
        Err(BenchError::ModelTooLarge {
            dimension: "size",
            requested: count,
            max: MAX_MODEL_SIZE,
        })
    } else {
        Ok(())
    }
}

/// Validate that a model depth is within acceptable limits
#[inline]
pub fn validate_model_depth(depth: usize) -> Result<()> {
    if depth > MAX_MODEL_DEPTH {
        Err(BenchError::ModelTooLarge {
            dimension: "depth",
            requested: depth,
            max: MAX_MODEL_DEPTH,
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_model_size() {
        assert!(validate_model_size(0).is_ok());
        assert!(validate_model_size(MAX_MODEL_SIZE).is_ok());

        match validate_model_size(MAX_MODEL_SIZE + 1) {
            Err(BenchError::ModelTooLarge {
                dimension,
                requested,
                max,
            }) => {
                assert_eq!(dimension, "size");
                assert_eq!(requested, MAX_MODEL_SIZE + 1);
                assert_eq!(max, MAX_MODEL_SIZE);
            }
            other => panic!("Expected ModelTooLarge error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_model_depth() {
        assert!(validate_model_depth(MAX_MODEL_DEPTH).is_ok());
        assert!(validate_model_depth(MAX_MODEL_DEPTH + 1).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = BenchError::InfeasibleModel { count: 112, max: 111 };
        let msg = err.to_string();
        assert!(msg.contains("max is 111"));
        assert!(msg.contains("count is set to 112"));

        let err = BenchError::invalid_config("iterations", "must be positive");
        let msg = err.to_string();
        assert!(msg.contains("iterations"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn test_repository_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let repo: RepositoryError = io.into();
        assert!(matches!(repo, RepositoryError::Io(_)));

        let bench: BenchError = repo.clone().into();
        assert_eq!(bench, BenchError::Repository(repo));
    }
}
