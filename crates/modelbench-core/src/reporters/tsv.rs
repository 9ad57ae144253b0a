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

//! Tab separated report file.
//!
//! The layout is consumed by existing tooling and must stay byte-exact:
//! tab separated fields, CRLF line ends, an aggregation table first and the
//! per-trial details after an `Iteration Details` banner.

use crate::error::Result;
use crate::harness::RunResults;
use crate::results::{AggregatedResult, BenchmarkResult};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

const SEPARATOR: &str = "\t";
const LINE_END: &str = "\r\n";

/// Header of the aggregation table. The trailing tab is part of the format.
pub const AGGREGATION_HEADER: &str =
    "CaseName\tRepoName\tIterations\tavgRealTime\trealTimeDev\tminRealTime\tmaxRealTime\t\r\n";

/// Header of the per-trial table.
pub const RESULT_HEADER: &str =
    "Case\tRepository\tsize\tdepth\twidth\trealTime\tavgUsed\tavgFree\tavgTotalAvailable\tavgMaxAvailable\r\n";

/// Renders run results in the report layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TsvReport;

impl TsvReport {
    pub fn render(&self, results: &RunResults) -> String {
        let mut aggregation = String::from(AGGREGATION_HEADER);
        let mut details = String::new();
        details.push_str(LINE_END);
        details.push_str("Iteration Details");
        details.push_str(LINE_END);
        details.push_str(LINE_END);
        details.push_str(RESULT_HEADER);

        for aggregated in results.aggregated.values() {
            aggregation.push_str(&aggregation_entry(aggregated));
            for trial in aggregated.results() {
                details.push_str(&result_entry(trial));
            }
        }
        aggregation.push_str(&details);
        aggregation
    }
}

// Case and repository column of an aggregation without trials.
const NO_NAME: &str = "NoName";

/// One row of the aggregation table.
pub fn aggregation_entry(aggregated: &AggregatedResult) -> String {
    let stats = aggregated.stats();
    let mut line = String::new();
    let _ = write!(
        line,
        "{case}{s}{repo}{s}{n}{s}{avg}{s}{dev}{s}{min}{s}{max}{end}",
        case = aggregated.case_name().unwrap_or(NO_NAME),
        repo = aggregated.repository_name().unwrap_or(NO_NAME),
        n = aggregated.len(),
        avg = stats.avg,
        dev = stats.deviation,
        min = stats.min,
        max = stats.max,
        s = SEPARATOR,
        end = LINE_END,
    );
    line
}

/// One row of the per-trial table.
pub fn result_entry(result: &BenchmarkResult) -> String {
    let props = result.properties();
    let mut line = String::new();
    let _ = write!(
        line,
        "{case}{s}{repo}{s}{count}{s}{depth}{s}{width}{s}{real}{s}{used}{s}{free}{s}{total}{s}{max}",
        case = result.case_name(),
        repo = result.repository_name(),
        count = props.count(),
        depth = props.depth(),
        width = props.width(),
        real = result.real_time_ms(),
        used = result.avg_used_memory(),
        free = result.avg_free_memory(),
        total = result.avg_total_available_memory(),
        max = result.max_available_memory(),
        s = SEPARATOR,
    );
    if result.is_failed() {
        line.push_str(SEPARATOR);
        line.push_str("failed");
    }
    line.push_str(LINE_END);
    line
}

/// `<dir>/results_<yyyyMMdd_HHmm>.csv`, suffixed `_1`, `_2`, ... when taken.
pub fn report_path(dir: &Path, at: DateTime<Local>) -> PathBuf {
    let stem = format!("results_{}", at.format("%Y%m%d_%H%M"));
    let mut path = dir.join(format!("{}.csv", stem));
    let mut suffix = 1;
    while path.exists() {
        path = dir.join(format!("{}_{}.csv", stem, suffix));
        suffix += 1;
    }
    path
}

/// Writes the report into `dir` and returns the file path.
pub fn write_report(results: &RunResults, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = report_path(dir, Local::now());
    std::fs::write(&path, TsvReport.render(results))?;
    info!("Results available in file \"{}\".", path.display());
    Ok(path)
}
