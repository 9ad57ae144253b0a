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

//! Benchmark reporters.
//!
//! - `tsv`: the tab separated report file
//! - `console`: summary printed to stdout

pub mod console;
pub mod tsv;

pub use console::{print_summary, render_summary};
pub use tsv::{report_path, write_report, TsvReport, AGGREGATION_HEADER, RESULT_HEADER};

use crate::config::{BenchConfig, ReportFormat};
use crate::error::Result;
use crate::harness::RunResults;
use std::path::PathBuf;

/// Emits every report format enabled in `config`.
///
/// Returns the path of the TSV file if one was written.
pub fn emit_reports(results: &RunResults, config: &BenchConfig) -> Result<Option<PathBuf>> {
    let path = if config.reports(ReportFormat::Tsv) {
        Some(write_report(results, &config.results_dir)?)
    } else {
        None
    };
    if config.reports(ReportFormat::Console) {
        print_summary(results);
    }
    Ok(path)
}
