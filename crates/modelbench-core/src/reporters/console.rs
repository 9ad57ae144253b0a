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

//! Console reporter for benchmark results.

use crate::harness::RunResults;

/// Renders the per-trial and per-aggregation summary lines.
pub fn render_summary(results: &RunResults) -> String {
    let mut out = String::new();
    for aggregated in results.aggregated.values() {
        for trial in aggregated.results() {
            out.push_str(&trial.to_string());
            out.push('\n');
        }
        out.push_str(&aggregated.to_string());
        out.push('\n');
    }
    out
}

/// Prints the run summary to stdout.
pub fn print_summary(results: &RunResults) {
    println!("\n{}", "=".repeat(80));
    println!("BENCHMARK SUMMARY");
    println!("{}", "=".repeat(80));
    println!(
        "Combinations: {}/{}  Trials: {}  Failed: {}{}",
        results.completed,
        results.total,
        results.trial_count(),
        results.failure_count(),
        if results.stopped { "  (stopped)" } else { "" }
    );
    println!("{}", "-".repeat(80));
    print!("{}", render_summary(results));
    println!("{}", "=".repeat(80));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::MeterReading;
    use crate::results::{AggregatedResult, BenchmarkResult};
    use std::time::Duration;

    #[test]
    fn test_render_summary() {
        let mut aggregated = AggregatedResult::new();
        for ms in [100, 200] {
            let reading = MeterReading {
                real_time: Duration::from_millis(ms),
                ..MeterReading::default()
            };
            aggregated.add_result(BenchmarkResult::new("X", "Y", reading));
        }
        let mut results = RunResults::default();
        results.aggregated.insert("X-Y".into(), aggregated);

        let summary = render_summary(&results);
        let lines: Vec<_> = summary.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[X | Y]: cpuTime:"));
        assert_eq!(
            lines[2],
            "[X | Y]: iterations: 2 / avgRealTime: 150 / realTimeDev: 70 / minRealTime: 100 / maxRealTime: 200"
        );
    }
}
