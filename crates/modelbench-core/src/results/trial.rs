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

//! Result of a single trial.

use crate::measurement::{HeapSnapshot, MeterReading};
use crate::model::ModelProperties;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Outcome of one case execution against one repository.
///
/// Built once by the case workflow and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    case_name: String,
    repository_name: String,
    properties: ModelProperties,
    reading: MeterReading,
    failed: bool,
}

impl BenchmarkResult {
    /// Creates a successful result.
    pub fn new(
        case_name: impl Into<String>,
        repository_name: impl Into<String>,
        reading: MeterReading,
    ) -> Self {
        Self {
            case_name: case_name.into(),
            repository_name: repository_name.into(),
            properties: ModelProperties::default(),
            reading,
            failed: false,
        }
    }

    /// Sets the properties of the model the trial ran with.
    pub fn with_properties(mut self, properties: ModelProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Sets the failure flag.
    pub fn with_failed(mut self, failed: bool) -> Self {
        self.failed = failed;
        self
    }

    pub fn case_name(&self) -> &str {
        &self.case_name
    }

    pub fn repository_name(&self) -> &str {
        &self.repository_name
    }

    pub fn properties(&self) -> &ModelProperties {
        &self.properties
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn real_time(&self) -> Duration {
        self.reading.real_time
    }

    /// Wall time in whole milliseconds.
    pub fn real_time_ms(&self) -> u64 {
        self.reading.real_time_ms()
    }

    /// CPU time in whole milliseconds.
    pub fn cpu_time_ms(&self) -> u64 {
        self.reading.cpu_time_ms()
    }

    pub fn avg_used_memory(&self) -> u64 {
        self.reading.avg_used_mb
    }

    pub fn avg_free_memory(&self) -> u64 {
        self.reading.avg_free_mb
    }

    pub fn avg_total_available_memory(&self) -> u64 {
        self.reading.avg_total_available_mb
    }

    pub fn max_available_memory(&self) -> u64 {
        self.reading.max_available_mb
    }

    pub fn snapshots(&self) -> &[HeapSnapshot] {
        &self.reading.snapshots
    }
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} | {}]: cpuTime: {} / realTime: {} / avgUsed: {} / avgFree: {} / avgTotalAvailable: {} / maxAvailable: {}",
            self.case_name,
            self.repository_name,
            self.cpu_time_ms(),
            self.real_time_ms(),
            self.avg_used_memory(),
            self.avg_free_memory(),
            self.avg_total_available_memory(),
            self.max_available_memory(),
        )?;
        if self.failed {
            write!(f, " (failed)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let reading = MeterReading {
            real_time: Duration::from_millis(1500),
            avg_used_mb: 12,
            ..MeterReading::default()
        };
        let props = ModelProperties::new(10, 2, 9, 0).unwrap();
        let result = BenchmarkResult::new("Save", "MEM", reading)
            .with_properties(props)
            .with_failed(true);

        assert_eq!(result.case_name(), "Save");
        assert_eq!(result.repository_name(), "MEM");
        assert_eq!(result.properties().count(), 10);
        assert_eq!(result.real_time_ms(), 1500);
        assert_eq!(result.avg_used_memory(), 12);
        assert!(result.is_failed());
        assert!(result.to_string().ends_with("(failed)"));
    }
}
