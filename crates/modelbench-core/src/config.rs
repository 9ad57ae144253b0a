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

//! Centralized benchmark configuration.
//!
//! Provides the settings shared by every benchmark run: iteration count,
//! memory polling interval, where reports go and in which formats.

use crate::error::{BenchError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default number of iterations per case/repository pair.
pub const DEFAULT_ITERATION_COUNT: u32 = 1;

/// Default interval between two memory snapshots.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_millis(1000);

/// Default directory for report files.
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    /// Tab separated report file.
    Tsv,
    /// Summary on stdout.
    Console,
}

/// Benchmark run configuration.
///
/// # Example
///
/// ```
/// use modelbench_core::config::{BenchConfig, ReportFormat};
///
/// let config = BenchConfig::default()
///     .with_iterations(3)
///     .with_report_formats(vec![ReportFormat::Tsv]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Iterations per case/repository pair.
    pub iterations: u32,
    /// Interval between memory snapshots while a measurement runs.
    pub polling_interval: Duration,
    /// Directory that receives report files.
    pub results_dir: PathBuf,
    /// Report formats emitted at the end of a run.
    pub report_formats: Vec<ReportFormat>,
    /// Directory holding pre-generated sample models, if any.
    pub sample_dir: Option<PathBuf>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATION_COUNT,
            polling_interval: DEFAULT_POLLING_INTERVAL,
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            report_formats: vec![ReportFormat::Tsv, ReportFormat::Console],
            sample_dir: None,
        }
    }
}

impl BenchConfig {
    /// Sets the iteration count.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the memory polling interval.
    pub fn with_polling_interval(mut self, interval: Duration) -> Self {
        self.polling_interval = interval;
        self
    }

    /// Sets the report directory.
    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    /// Sets all report formats. An empty list disables reporting.
    pub fn with_report_formats(mut self, formats: Vec<ReportFormat>) -> Self {
        self.report_formats = formats;
        self
    }

    /// Reads sample models from `dir` instead of generating them.
    pub fn with_sample_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.sample_dir = Some(dir.into());
        self
    }

    /// Returns true if the given report format is enabled.
    pub fn reports(&self, format: ReportFormat) -> bool {
        self.report_formats.contains(&format)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(BenchError::invalid_config(
                "iterations",
                "must be at least 1",
            ));
        }
        if self.polling_interval.is_zero() {
            return Err(BenchError::invalid_config(
                "polling_interval",
                "must be greater than zero",
            ));
        }
        if self.reports(ReportFormat::Tsv) && self.results_dir.as_os_str().is_empty() {
            return Err(BenchError::invalid_config(
                "results_dir",
                "must not be empty when TSV reports are enabled",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BenchConfig::default();
        assert_eq!(config.iterations, 1);
        assert_eq!(config.polling_interval, Duration::from_secs(1));
        assert_eq!(config.results_dir, PathBuf::from("results"));
        assert!(config.reports(ReportFormat::Tsv));
        assert!(config.reports(ReportFormat::Console));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = BenchConfig::default()
            .with_iterations(5)
            .with_polling_interval(Duration::from_millis(10))
            .with_results_dir("out")
            .with_report_formats(vec![]);

        assert_eq!(config.iterations, 5);
        assert_eq!(config.polling_interval, Duration::from_millis(10));
        assert_eq!(config.results_dir, PathBuf::from("out"));
        assert!(!config.reports(ReportFormat::Tsv));
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let err = BenchConfig::default().with_iterations(0).validate().unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfig { ref parameter, .. } if parameter == "iterations"));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = BenchConfig::default().with_polling_interval(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_results_dir() {
        let config = BenchConfig::default().with_results_dir("");
        assert!(config.validate().is_err());

        let config = BenchConfig::default()
            .with_results_dir("")
            .with_report_formats(vec![ReportFormat::Console]);
        assert!(config.validate().is_ok());
    }
}
