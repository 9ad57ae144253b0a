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

//! Benchmark orchestration.
//!
//! The [`BenchmarkManager`] runs every case of every registered group against
//! the selected repositories, `iterations` times, strictly one trial at a
//! time. Loop order is iteration, group, case, repository. Unsupported
//! combinations are skipped but still count towards progress. A stop request
//! is honoured after the in-flight trial completes.

use super::case::{BenchmarkCase, BenchmarkData};
use super::registry::{GroupRegistry, RepositoryRegistry};
use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::measurement::{MemoryProbe, SystemMemoryProbe};
use crate::repository::ModelRepository;
use crate::results::{AggregatedResult, BenchmarkResult};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Cooperative stop flag shared with other threads.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the running batch to return after the current trial.
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clears the flag, returning whether it was set.
    fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

/// Progress after one combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub case: String,
    pub repository: String,
    pub skipped: bool,
    pub failed: bool,
}

impl Progress {
    /// Completed share in whole percent.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            self.completed * 100 / self.total
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Progress {}% ({}/{}) | [{}]-[{}] {} {}",
            self.percent(),
            self.completed,
            self.total,
            self.case,
            self.repository,
            if self.skipped { "(skipped)" } else { "" },
            if self.failed { "(failed)" } else { "" },
        )
    }
}

/// Callback invoked after every combination.
pub type ProgressObserver = Box<dyn Fn(&Progress) + Send + Sync>;

/// Everything one run produced.
#[derive(Debug, Default)]
pub struct RunResults {
    /// Aggregations keyed by `"<case>-<repository>"`.
    pub aggregated: BTreeMap<String, AggregatedResult>,
    /// Whether the run ended early on a stop request.
    pub stopped: bool,
    /// Combinations processed, skipped ones included.
    pub completed: usize,
    /// Combinations planned.
    pub total: usize,
}

impl RunResults {
    /// Number of trials across all aggregations.
    pub fn trial_count(&self) -> usize {
        self.aggregated.values().map(AggregatedResult::len).sum()
    }

    pub fn failure_count(&self) -> usize {
        self.aggregated.values().map(AggregatedResult::failures).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.aggregated.is_empty()
    }
}

/// Drives cases against repositories.
pub struct BenchmarkManager {
    repositories: Arc<RepositoryRegistry>,
    groups: Arc<GroupRegistry>,
    config: BenchConfig,
    probe: Arc<dyn MemoryProbe>,
    stop: StopHandle,
    observer: Option<ProgressObserver>,
}

impl BenchmarkManager {
    pub fn new(
        repositories: Arc<RepositoryRegistry>,
        groups: Arc<GroupRegistry>,
        config: BenchConfig,
    ) -> Self {
        Self {
            repositories,
            groups,
            config,
            probe: Arc::new(SystemMemoryProbe::new()),
            stop: StopHandle::new(),
            observer: None,
        }
    }

    /// Uses `probe` for every meter of this manager.
    pub fn with_probe(mut self, probe: Arc<dyn MemoryProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_progress_observer(mut self, observer: ProgressObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn repositories(&self) -> &RepositoryRegistry {
        &self.repositories
    }

    pub fn groups(&self) -> &GroupRegistry {
        &self.groups
    }

    /// Handle other threads can use to stop a running batch.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Requests a stop after the in-flight trial.
    pub fn stop(&self) {
        info!("Stopping benchmark, please wait for benchmark case under execution to finish");
        self.stop.request_stop();
    }

    pub fn list_repositories(&self) -> Vec<String> {
        self.repositories
            .list()
            .iter()
            .map(|r| r.name().to_string())
            .collect()
    }

    pub fn repository_exists(&self, name: &str) -> bool {
        self.repositories.find(name).is_some()
    }

    /// Benchmarks every available repository.
    pub fn run_all(&self, iterations: u32) -> Result<RunResults> {
        validate_iterations(iterations)?;
        info!("Benchmarking all available repositories");
        let registered = self.repositories.list();
        debug!(
            "Number of Model Repositories registered for benchmarking is {}",
            registered.len()
        );

        let mut selected = Vec::new();
        for repository in registered {
            if !repository.is_available() {
                info!(
                    "Repository \"{}\" is registered but not available, will not be benchmarked",
                    repository.name()
                );
                continue;
            }
            debug!("Cleaning repository \"{}\" before benchmarking starts", repository.name());
            repository.clean();
            selected.push(repository);
        }
        self.run(&selected, iterations)
    }

    /// Benchmarks the repository with the given name (case-insensitive).
    pub fn run_one(&self, name: &str, iterations: u32) -> Result<RunResults> {
        validate_iterations(iterations)?;
        info!("Starting benchmarking for repository {}", name);
        let repository = self
            .repositories
            .find(name)
            .ok_or_else(|| BenchError::UnknownRepository(name.to_string()))?;
        info!("Repository \"{}\" found", repository.name());

        if !repository.is_available() {
            return Err(BenchError::RepositoryUnavailable(repository.name().to_string()));
        }
        repository.clean();
        self.run(&[repository], iterations)
    }

    fn run(&self, repositories: &[Arc<dyn ModelRepository>], iterations: u32) -> Result<RunResults> {
        // A stop requested while no batch was looping must not end this one.
        if self.stop.take() {
            debug!("Discarding stop request issued before the run started");
        }
        let results = self.run_iterations(repositories, iterations);
        self.stop.take();
        results
    }

    fn run_iterations(
        &self,
        repositories: &[Arc<dyn ModelRepository>],
        iterations: u32,
    ) -> Result<RunResults> {
        let groups = self.groups.list();
        debug!("Number of benchmark groups available is {}", groups.len());

        let mut plan: Vec<Vec<BenchmarkCase>> = Vec::with_capacity(groups.len());
        for group in &groups {
            let mut cases = group.cases();
            for case in &mut cases {
                case.configure_meter(self.config.polling_interval, Arc::clone(&self.probe));
                case.set_sample_dir(self.config.sample_dir.clone());
            }
            debug!(
                "Group \"{}\" is registered and contains {} cases",
                group.name(),
                cases.len()
            );
            plan.push(cases);
        }

        let case_count: usize = plan.iter().map(Vec::len).sum();
        let mut results = RunResults {
            total: case_count * repositories.len() * iterations as usize,
            ..RunResults::default()
        };
        info!("Executing Model Repository Benchmarks");
        info!("Total combinations to test: {}", results.total);

        for iteration in 1..=iterations {
            info!("Executing Iteration: {}/{}", iteration, iterations);
            for case in plan.iter_mut().flatten() {
                for repository in repositories {
                    let skipped = !repository.supports(case.name());
                    let mut failed = false;
                    if !skipped {
                        match self.execute(case, repository, iteration) {
                            Some(trial) => {
                                failed = trial.is_failed();
                                let key = format!("{}-{}", case.name(), repository.name());
                                results.aggregated.entry(key).or_default().add_result(trial);
                            }
                            None => failed = true,
                        }
                    }

                    results.completed += 1;
                    let progress = Progress {
                        completed: results.completed,
                        total: results.total,
                        case: case.name().to_string(),
                        repository: repository.name().to_string(),
                        skipped,
                        failed,
                    };
                    info!("{}", progress);
                    if let Some(observer) = &self.observer {
                        observer(&progress);
                    }

                    if self.stop.take() {
                        case.reset();
                        info!("Benchmark Stopped");
                        results.stopped = true;
                        return Ok(results);
                    }
                }
                case.reset();
            }
        }
        Ok(results)
    }

    /// Runs one trial. `None` when no measurement was taken.
    fn execute(
        &self,
        case: &mut BenchmarkCase,
        repository: &Arc<dyn ModelRepository>,
        iteration: u32,
    ) -> Option<BenchmarkResult> {
        let data = BenchmarkData::new(Arc::clone(repository)).with_iteration(iteration);
        match case.execute_benchmark(&data) {
            Ok(result) => Some(result),
            Err(e) => {
                error!("Test {} with repo {} failed", case.name(), repository.name());
                error!("Exception caught while executing benchmark: {}", e);
                None
            }
        }
    }
}

fn validate_iterations(iterations: u32) -> Result<()> {
    if iterations == 0 {
        Err(BenchError::invalid_config("iterations", "must be at least 1"))
    } else {
        Ok(())
    }
}
