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

//! Command-line definitions.
//!
//! Every benchmarking command shares [`BenchOptions`]; they map onto
//! [`BenchConfig`] and the target set.

use crate::commands;
use crate::controller::Target;
use crate::error::CliError;
use clap::{Args, Subcommand};
use modelbench_core::config::{DEFAULT_ITERATION_COUNT, DEFAULT_RESULTS_DIR};
use modelbench_core::{BenchConfig, ReportFormat};
use std::path::PathBuf;
use std::time::Duration;

/// Options shared by the benchmarking commands.
#[derive(Args, Debug, Clone)]
pub struct BenchOptions {
    /// Interval between memory snapshots, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 1000,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub polling_interval_ms: u64,

    /// Directory receiving the report files
    #[arg(long, value_name = "DIR", default_value = DEFAULT_RESULTS_DIR)]
    pub results_dir: PathBuf,

    /// Do not write a report file
    #[arg(long)]
    pub no_report: bool,

    /// Directory for file-backed repositories (temporary if omitted)
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Read sample models from this directory instead of generating them
    #[arg(long, value_name = "DIR")]
    pub sample_dir: Option<PathBuf>,

    /// Include the 100K node traversal case
    #[arg(long)]
    pub huge: bool,
}

impl BenchOptions {
    /// Benchmark configuration described by these options.
    pub fn config(&self) -> BenchConfig {
        let mut formats = Vec::new();
        if !self.no_report {
            formats.push(ReportFormat::Tsv);
        }
        formats.push(ReportFormat::Console);

        let config = BenchConfig::default()
            .with_polling_interval(Duration::from_millis(self.polling_interval_ms))
            .with_results_dir(&self.results_dir)
            .with_report_formats(formats);
        match &self.sample_dir {
            Some(dir) => config.with_sample_dir(dir),
            None => config,
        }
    }
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Benchmark one repository, or all available ones with `all`
    Run {
        /// Repository name (case-insensitive) or `all`
        #[arg(value_name = "TARGET")]
        target: String,

        /// Iterations per case and repository
        #[arg(short = 'n', long, default_value_t = DEFAULT_ITERATION_COUNT,
              value_parser = clap::value_parser!(u32).range(1..))]
        iterations: u32,

        #[command(flatten)]
        options: BenchOptions,
    },

    /// List registered repositories
    List {
        #[command(flatten)]
        options: BenchOptions,
    },

    /// Start the interactive console
    Console {
        #[command(flatten)]
        options: BenchOptions,
    },

    /// Write the sample models as JSON files
    GenerateSample {
        /// Output directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Sample sizes to write (1, 10, 100, 1k, 10k, 100k); all if omitted
        #[arg(long = "size", value_name = "SIZE")]
        sizes: Vec<String>,
    },
}

impl Commands {
    /// Executes the command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Run {
                target,
                iterations,
                options,
            } => commands::run(target.parse::<Target>()?, iterations, &options),
            Commands::List { options } => commands::list(&options),
            Commands::Console { options } => commands::console(&options),
            Commands::GenerateSample { dir, sizes } => commands::generate_sample(&dir, &sizes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> BenchOptions {
        BenchOptions {
            polling_interval_ms: 250,
            results_dir: PathBuf::from("out"),
            no_report: false,
            work_dir: None,
            sample_dir: None,
            huge: false,
        }
    }

    #[test]
    fn test_config_from_options() {
        let config = options().config();
        assert_eq!(config.polling_interval, Duration::from_millis(250));
        assert_eq!(config.results_dir, PathBuf::from("out"));
        assert!(config.reports(ReportFormat::Tsv));
        assert!(config.reports(ReportFormat::Console));
        assert!(config.sample_dir.is_none());
    }

    #[test]
    fn test_no_report() {
        let mut options = options();
        options.no_report = true;
        options.sample_dir = Some(PathBuf::from("samples"));
        let config = options.config();
        assert!(!config.reports(ReportFormat::Tsv));
        assert_eq!(config.sample_dir, Some(PathBuf::from("samples")));
    }
}
