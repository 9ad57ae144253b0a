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

//! Stopwatch with a concurrent memory sampler.
//!
//! A [`Meter`] brackets one measured operation. `start_measuring` seeds a
//! first snapshot synchronously, launches a sampler thread that appends a
//! snapshot every polling interval and records the start instant last, so
//! no sampler setup cost is timed. `stop_measuring` records the stop instant
//! first, then signals the sampler and joins it.

use super::cpu::process_cpu_time;
use super::snapshot::{HeapSnapshot, MemoryProbe};
use crate::error::{BenchError, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::warn;

/// Immutable outcome of one start/stop pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterReading {
    /// Wall time between start and stop.
    pub real_time: Duration,
    /// Process CPU time consumed between start and stop.
    pub cpu_time: Duration,
    /// Mean of `used_mb` over all snapshots.
    pub avg_used_mb: u64,
    /// Mean of `free_mb` over all snapshots.
    pub avg_free_mb: u64,
    /// Mean of `total_available_mb` over all snapshots.
    pub avg_total_available_mb: u64,
    /// Probe maximum at stop time, not averaged.
    pub max_available_mb: u64,
    /// Snapshots in the order they were taken.
    pub snapshots: Vec<HeapSnapshot>,
}

impl MeterReading {
    pub fn real_time_ms(&self) -> u64 {
        self.real_time.as_millis() as u64
    }

    pub fn cpu_time_ms(&self) -> u64 {
        self.cpu_time.as_millis() as u64
    }
}

struct Sampler {
    started: Instant,
    cpu_started: Duration,
    snapshots: Arc<Mutex<Vec<HeapSnapshot>>>,
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

/// Measures wall time and samples memory while an operation runs.
pub struct Meter {
    polling_interval: Duration,
    probe: Arc<dyn MemoryProbe>,
    sampler: Option<Sampler>,
    reading: Option<MeterReading>,
}

impl Meter {
    pub fn new(polling_interval: Duration, probe: Arc<dyn MemoryProbe>) -> Self {
        Self {
            polling_interval,
            probe,
            sampler: None,
            reading: None,
        }
    }

    pub fn polling_interval(&self) -> Duration {
        self.polling_interval
    }

    /// Returns true between `start_measuring` and `stop_measuring`.
    pub fn is_running(&self) -> bool {
        self.sampler.is_some()
    }

    /// Starts timing and launches the sampler.
    ///
    /// A meter that is already running is left untouched.
    pub fn start_measuring(&mut self) -> Result<()> {
        if self.sampler.is_some() {
            warn!("Meter already running, ignoring start request");
            return Ok(());
        }
        self.reading = None;

        let snapshots = Arc::new(Mutex::new(vec![self.probe.snapshot()]));
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let interval = self.polling_interval;
        let probe = Arc::clone(&self.probe);
        let buffer = Arc::clone(&snapshots);

        let handle = thread::Builder::new()
            .name("modelbench-meter".to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => buffer.lock().push(probe.snapshot()),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        let cpu_started = process_cpu_time();
        self.sampler = Some(Sampler {
            started: Instant::now(),
            cpu_started,
            snapshots,
            stop_tx,
            handle,
        });
        Ok(())
    }

    /// Stops timing and the sampler. Does nothing if the meter is not running.
    pub fn stop_measuring(&mut self) {
        let Some(sampler) = self.sampler.take() else {
            return;
        };
        let real_time = sampler.started.elapsed();
        let cpu_time = process_cpu_time().saturating_sub(sampler.cpu_started);

        // A closed channel also ends the loop, so a failed send is harmless.
        let _ = sampler.stop_tx.send(());
        if sampler.handle.join().is_err() {
            warn!("Memory sampler thread panicked");
        }

        let snapshots = std::mem::take(&mut *sampler.snapshots.lock());
        self.reading = Some(build_reading(
            real_time,
            cpu_time,
            snapshots,
            self.probe.max_available_mb(),
        ));
    }

    /// Stops the meter if needed and forgets the last reading.
    pub fn reset(&mut self) {
        self.stop_measuring();
        self.reading = None;
    }

    /// Reading of the last completed start/stop pair.
    pub fn result(&self) -> Result<MeterReading> {
        self.reading.clone().ok_or(BenchError::MeterNotStopped)
    }
}

impl Drop for Meter {
    fn drop(&mut self) {
        self.stop_measuring();
    }
}

fn build_reading(
    real_time: Duration,
    cpu_time: Duration,
    snapshots: Vec<HeapSnapshot>,
    max_available_mb: u64,
) -> MeterReading {
    let n = snapshots.len().max(1) as u64;
    let (used, free, total) = snapshots.iter().fold((0u64, 0u64, 0u64), |acc, s| {
        (
            acc.0 + s.used_mb,
            acc.1 + s.free_mb,
            acc.2 + s.total_available_mb,
        )
    });
    MeterReading {
        real_time,
        cpu_time,
        avg_used_mb: used / n,
        avg_free_mb: free / n,
        avg_total_available_mb: total / n,
        max_available_mb,
        snapshots,
    }
}
