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

//! Aggregation of trials sharing a case and a repository.
//!
//! Statistics are computed on whole milliseconds with integer semantics:
//! the average truncates, and the deviation is the truncated square root of
//! the sample variance (divided by `n - 1`, zero below two trials).

use super::trial::BenchmarkResult;
use once_cell::unsync::OnceCell;
use std::fmt;

/// Name reported by an aggregation without trials.
pub const EMPTY_AGGREGATION_NAME: &str = "NoAggregatedResults";

/// Real time statistics in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RealTimeStats {
    pub avg: u64,
    pub deviation: u64,
    pub min: u64,
    pub max: u64,
}

impl RealTimeStats {
    fn compute(times: &[u64]) -> Self {
        if times.is_empty() {
            return Self::default();
        }
        let n = times.len() as u64;
        let sum: u128 = times.iter().map(|&t| t as u128).sum();
        let avg = (sum / n as u128) as u64;

        let deviation = if n < 2 {
            0
        } else {
            let squares: f64 = times
                .iter()
                .map(|&t| {
                    let diff = t as f64 - avg as f64;
                    diff * diff
                })
                .sum();
            (squares / (n - 1) as f64).sqrt() as u64
        };

        Self {
            avg,
            deviation,
            min: times.iter().copied().min().unwrap_or(0),
            max: times.iter().copied().max().unwrap_or(0),
        }
    }
}

/// Ordered trials of one case against one repository.
#[derive(Debug, Clone, Default)]
pub struct AggregatedResult {
    results: Vec<BenchmarkResult>,
    stats: OnceCell<RealTimeStats>,
}

impl AggregatedResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a trial and invalidates cached statistics.
    pub fn add_result(&mut self, result: BenchmarkResult) {
        self.results.push(result);
        self.stats = OnceCell::new();
    }

    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of failed trials.
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| r.is_failed()).count()
    }

    /// `"<case> | <repository>"` of the first trial.
    pub fn name(&self) -> String {
        match self.results.first() {
            Some(first) => format!("{} | {}", first.case_name(), first.repository_name()),
            None => EMPTY_AGGREGATION_NAME.to_string(),
        }
    }

    pub fn case_name(&self) -> Option<&str> {
        self.results.first().map(BenchmarkResult::case_name)
    }

    pub fn repository_name(&self) -> Option<&str> {
        self.results.first().map(BenchmarkResult::repository_name)
    }

    pub fn stats(&self) -> RealTimeStats {
        *self.stats.get_or_init(|| {
            let times: Vec<u64> = self.results.iter().map(BenchmarkResult::real_time_ms).collect();
            RealTimeStats::compute(&times)
        })
    }

    pub fn avg_real_time(&self) -> u64 {
        self.stats().avg
    }

    pub fn real_time_deviation(&self) -> u64 {
        self.stats().deviation
    }

    pub fn min_real_time(&self) -> u64 {
        self.stats().min
    }

    pub fn max_real_time(&self) -> u64 {
        self.stats().max
    }
}

impl fmt::Display for AggregatedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        write!(
            f,
            "[{}]: iterations: {} / avgRealTime: {} / realTimeDev: {} / minRealTime: {} / maxRealTime: {}",
            self.name(),
            self.len(),
            stats.avg,
            stats.deviation,
            stats.min,
            stats.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::MeterReading;
    use proptest::prelude::*;
    use std::time::Duration;

    fn trial(ms: u64) -> BenchmarkResult {
        let reading = MeterReading {
            real_time: Duration::from_millis(ms),
            ..MeterReading::default()
        };
        BenchmarkResult::new("X", "Y", reading)
    }

    fn aggregate(times: &[u64]) -> AggregatedResult {
        let mut agg = AggregatedResult::new();
        for &t in times {
            agg.add_result(trial(t));
        }
        agg
    }

    #[test]
    fn test_empty_aggregation() {
        let agg = AggregatedResult::new();
        assert_eq!(agg.name(), "NoAggregatedResults");
        assert_eq!(agg.stats(), RealTimeStats::default());
    }

    #[test]
    fn test_two_trials() {
        let agg = aggregate(&[100, 200]);
        assert_eq!(agg.name(), "X | Y");
        assert_eq!(agg.avg_real_time(), 150);
        assert_eq!(agg.min_real_time(), 100);
        assert_eq!(agg.max_real_time(), 200);
        // sqrt((50² + 50²) / 1) = 70.71
        assert_eq!(agg.real_time_deviation(), 70);
    }

    #[test]
    fn test_average_truncates() {
        let agg = aggregate(&[1, 2]);
        assert_eq!(agg.avg_real_time(), 1);

        let agg = aggregate(&[10, 10, 11]);
        assert_eq!(agg.avg_real_time(), 10);
    }

    #[test]
    fn test_single_trial_has_no_deviation() {
        let agg = aggregate(&[42]);
        assert_eq!(agg.real_time_deviation(), 0);
        assert_eq!(agg.avg_real_time(), 42);
    }

    #[test]
    fn test_add_invalidates_cache() {
        let mut agg = aggregate(&[100]);
        assert_eq!(agg.max_real_time(), 100);
        agg.add_result(trial(300));
        assert_eq!(agg.max_real_time(), 300);
        assert_eq!(agg.avg_real_time(), 200);
    }

    #[test]
    fn test_display() {
        let agg = aggregate(&[100, 200]);
        assert_eq!(
            agg.to_string(),
            "[X | Y]: iterations: 2 / avgRealTime: 150 / realTimeDev: 70 / minRealTime: 100 / maxRealTime: 200"
        );
    }

    proptest! {
        #[test]
        fn prop_stats_match_definition(times in prop::collection::vec(0u64..100_000, 1..40)) {
            let agg = aggregate(&times);
            let n = times.len() as u64;
            prop_assert_eq!(agg.avg_real_time(), times.iter().sum::<u64>() / n);
            prop_assert_eq!(agg.min_real_time(), *times.iter().min().unwrap());
            prop_assert_eq!(agg.max_real_time(), *times.iter().max().unwrap());
            prop_assert_eq!(agg.len(), times.len());
            if n == 1 {
                prop_assert_eq!(agg.real_time_deviation(), 0);
            }
        }
    }
}
