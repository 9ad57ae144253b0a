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

//! Foreground benchmark run.

use super::build_manager;
use crate::cli::BenchOptions;
use crate::console::print_outcome;
use crate::controller::{BenchmarkController, Target};
use crate::error::CliError;
use std::io;

/// Runs one batch and waits for it.
pub fn run(target: Target, iterations: u32, options: &BenchOptions) -> Result<(), CliError> {
    let controller = BenchmarkController::new(build_manager(options)?);
    controller.start(target, iterations)?;
    let outcome = controller.wait()?;
    print_outcome(&outcome, &mut io::stdout().lock()).map_err(|e| CliError::io_error("stdout", e))
}
