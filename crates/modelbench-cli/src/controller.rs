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

//! Background benchmark execution.
//!
//! The [`BenchmarkController`] runs at most one batch at a time on a worker
//! thread, so the console stays responsive and can ask the batch to stop.

use crate::error::CliError;
use modelbench_core::reporters::emit_reports;
use modelbench_core::{BenchmarkManager, RunResults};
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{error, info};

// Deep generated models are cloned recursively.
const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Which repositories a batch runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    All,
    Named(String),
}

impl FromStr for Target {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err(CliError::invalid_argument("target", s, "must not be empty"))
        } else if s.eq_ignore_ascii_case("all") {
            Ok(Target::All)
        } else {
            Ok(Target::Named(s.to_string()))
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::All => f.write_str("all"),
            Target::Named(name) => f.write_str(name),
        }
    }
}

/// What a finished batch produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub results: RunResults,
    /// Path of the report file, if one was written.
    pub report: Option<PathBuf>,
}

type Worker = JoinHandle<Result<RunOutcome, CliError>>;

/// Owns the manager and the single worker thread.
pub struct BenchmarkController {
    manager: Arc<BenchmarkManager>,
    worker: Mutex<Option<Worker>>,
}

impl BenchmarkController {
    pub fn new(manager: Arc<BenchmarkManager>) -> Self {
        Self {
            manager,
            worker: Mutex::new(None),
        }
    }

    pub fn manager(&self) -> &BenchmarkManager {
        &self.manager
    }

    /// Whether a batch is executing right now.
    pub fn is_running(&self) -> bool {
        self.worker
            .lock()
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    /// Starts a batch in the background.
    ///
    /// Fails with [`CliError::AlreadyRunning`] while another batch executes.
    /// The outcome of a previous, finished batch is discarded.
    pub fn start(&self, target: Target, iterations: u32) -> Result<(), CliError> {
        let mut worker = self.worker.lock();
        if worker.as_ref().is_some_and(|w| !w.is_finished()) {
            return Err(CliError::AlreadyRunning);
        }
        if let Target::Named(name) = &target {
            if !self.manager.repository_exists(name) {
                return Err(modelbench_core::BenchError::UnknownRepository(name.clone()).into());
            }
        }
        if let Some(previous) = worker.take() {
            discard(previous);
        }

        let manager = Arc::clone(&self.manager);
        let handle = thread::Builder::new()
            .name("modelbench-runner".to_string())
            .stack_size(WORKER_STACK_SIZE)
            .spawn(move || execute(&manager, &target, iterations))
            .map_err(|e| CliError::io_error("modelbench-runner", e))?;
        *worker = Some(handle);
        Ok(())
    }

    /// Asks the running batch to return after its current trial.
    pub fn stop(&self) -> Result<(), CliError> {
        if !self.is_running() {
            return Err(CliError::NotRunning);
        }
        self.manager.stop();
        Ok(())
    }

    /// Blocks until the current batch finishes and returns its outcome.
    pub fn wait(&self) -> Result<RunOutcome, CliError> {
        let worker = self.worker.lock().take().ok_or(CliError::NotRunning)?;
        join(worker)
    }

    /// Outcome of a finished batch, without blocking.
    pub fn take_finished(&self) -> Option<Result<RunOutcome, CliError>> {
        let mut worker = self.worker.lock();
        if worker.as_ref().is_some_and(|w| w.is_finished()) {
            worker.take().map(join)
        } else {
            None
        }
    }
}

fn join(worker: Worker) -> Result<RunOutcome, CliError> {
    worker
        .join()
        .map_err(|payload| CliError::WorkerPanicked(panic_message(payload.as_ref())))?
}

/// Joins a finished batch nobody collected, logging what it produced.
fn discard(worker: Worker) -> Option<CliError> {
    match join(worker) {
        Ok(outcome) => {
            info!(
                "Discarding outcome of previous benchmark: {}/{} combinations",
                outcome.results.completed, outcome.results.total
            );
            None
        }
        Err(e) => {
            error!("Previous benchmark failed: {}", e);
            Some(e)
        }
    }
}

fn execute(
    manager: &BenchmarkManager,
    target: &Target,
    iterations: u32,
) -> Result<RunOutcome, CliError> {
    let results = match target {
        Target::All => manager.run_all(iterations),
        Target::Named(name) => manager.run_one(name, iterations),
    };
    let results = results.map_err(|e| {
        error!("Benchmark run failed: {}", e);
        e
    })?;

    let report = emit_reports(&results, manager.config())?;
    if let Some(path) = &report {
        info!("Results written to {}", path.display());
    }
    Ok(RunOutcome { results, report })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
