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

//! ModelBench command line interface

use clap::Parser;
use modelbench_cli::cli::Commands;
use modelbench_cli::logging;
use std::process::ExitCode;

/// ModelBench - model repository benchmark harness
///
/// Measures time and memory of storing, loading and traversing tree models
/// in pluggable repositories, and writes the aggregated results as a tab
/// separated report.
///
/// # Examples
///
/// ```bash
/// # Benchmark every available repository three times
/// modelbench run all --iterations 3
///
/// # Benchmark the in-memory repository without writing a report
/// modelbench run MEM --no-report
///
/// # Interactive console
/// modelbench console
/// ```
#[derive(Parser)]
#[command(name = "modelbench")]
#[command(author, version, about = "ModelBench - model repository benchmark harness", long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
