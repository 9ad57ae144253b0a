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

//! Memory snapshots and the probes that take them.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sysinfo::{Pid, System};

const MB: u64 = 1024 * 1024;

/// Point-in-time memory usage, all values in MB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeapSnapshot {
    pub timestamp: DateTime<Utc>,
    pub used_mb: u64,
    pub free_mb: u64,
    pub total_available_mb: u64,
    pub max_available_mb: u64,
}

/// Source of memory figures for the meter and the generator.
pub trait MemoryProbe: Send + Sync {
    /// Takes one snapshot.
    fn snapshot(&self) -> HeapSnapshot;

    /// Upper bound of memory the process may use, in MB.
    fn max_available_mb(&self) -> u64;
}

/// Memory probe backed by `sysinfo`.
///
/// Used memory is the resident set of this process, free memory is what
/// the system reports as available, total available is their sum and the
/// maximum is the physical memory of the machine.
pub struct SystemMemoryProbe {
    system: Mutex<System>,
    pid: Option<Pid>,
}

impl SystemMemoryProbe {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
            pid: sysinfo::get_current_pid().ok(),
        }
    }
}

impl Default for SystemMemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for SystemMemoryProbe {
    fn snapshot(&self) -> HeapSnapshot {
        let mut system = self.system.lock();
        system.refresh_memory();
        let used = match self.pid {
            Some(pid) if system.refresh_process(pid) => {
                system.process(pid).map_or(0, |p| p.memory())
            }
            _ => 0,
        };
        let free = system.available_memory();
        HeapSnapshot {
            timestamp: Utc::now(),
            used_mb: used / MB,
            free_mb: free / MB,
            total_available_mb: (used + free) / MB,
            max_available_mb: system.total_memory() / MB,
        }
    }

    fn max_available_mb(&self) -> u64 {
        let mut system = self.system.lock();
        system.refresh_memory();
        system.total_memory() / MB
    }
}
