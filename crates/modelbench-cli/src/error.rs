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

//! Error types for the modelbench CLI.

use modelbench_core::{BenchError, RepositoryError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by CLI commands and the interactive console.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A benchmark is already executing.
    #[error("Benchmark already running")]
    AlreadyRunning,

    /// `stop` or `wait` without a running benchmark.
    #[error("No benchmark is running")]
    NotRunning,

    /// Unrecognised console command.
    #[error("Unknown command '{0}'. Type 'help' for the list of commands")]
    UnknownCommand(String),

    /// A command argument could not be parsed.
    #[error("Invalid argument '{value}' for {argument}: {reason}")]
    InvalidArgument {
        argument: &'static str,
        value: String,
        reason: String,
    },

    /// I/O failure with the affected path.
    #[error("I/O error for '{path}': {message}")]
    Io { path: PathBuf, message: String },

    /// The benchmark worker thread panicked.
    #[error("Benchmark worker panicked: {0}")]
    WorkerPanicked(String),

    #[error(transparent)]
    Bench(#[from] BenchError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CliError {
    pub fn io_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn invalid_argument(
        argument: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CliError::InvalidArgument {
            argument,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(CliError::AlreadyRunning.to_string(), "Benchmark already running");
        let err = CliError::invalid_argument("iterations", "zero", "not a number");
        assert_eq!(
            err.to_string(),
            "Invalid argument 'zero' for iterations: not a number"
        );
        let err: CliError = BenchError::UnknownRepository("X".into()).into();
        assert!(err.to_string().contains("X"));
    }
}
