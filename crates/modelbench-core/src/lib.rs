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

//! Dweve ModelBench core
//!
//! Measurement and aggregation engine for benchmarking model repositories.
//!
//! ## Features
//!
//! - **Meter**: wall and CPU time with a concurrent memory sampler
//! - **Case workflow**: set up, measure and tear down around case-specific
//!   logic, with guaranteed teardown and failure capture
//! - **Repository abstraction**: uniform lifecycle state machine over
//!   heterogeneous storage backends
//! - **Orchestration**: iterations × groups × cases × repositories with
//!   progress reporting and cooperative stop
//! - **Reports**: aggregated statistics in a tab separated report file
//!
//! ## Usage
//!
//! ```no_run
//! use modelbench_core::{BenchConfig, BenchmarkManager, GroupRegistry, RepositoryRegistry};
//! use std::sync::Arc;
//!
//! let repositories = Arc::new(RepositoryRegistry::new());
//! let groups = Arc::new(GroupRegistry::new());
//! // register repositories and groups here
//! let manager = BenchmarkManager::new(repositories, groups, BenchConfig::default());
//! let results = manager.run_all(1).unwrap();
//! println!("{} trials", results.trial_count());
//! ```

pub mod config;
pub mod error;
pub mod generators;
pub mod harness;
pub mod measurement;
pub mod model;
pub mod reporters;
pub mod repository;
pub mod results;

pub use config::{BenchConfig, ReportFormat, DEFAULT_ITERATION_COUNT};
pub use error::{
    validate_model_depth, validate_model_size, BenchError, RepositoryError, Result,
    MAX_MODEL_DEPTH, MAX_MODEL_SIZE,
};
pub use generators::{ModelGenerator, SampleModel};
pub use harness::{
    default_set_up, default_tear_down, BenchmarkCase, BenchmarkData, BenchmarkGroup,
    BenchmarkManager, CaseLogic, GroupRegistry, ModelSource, Progress, RepositoryRegistry,
    RunResults, StopHandle,
};
pub use measurement::{HeapSnapshot, MemoryProbe, Meter, MeterReading, SystemMemoryProbe};
pub use model::{BenchmarkModel, ModelProperties, Node};
pub use repository::{
    EventLevel, LifecycleHooks, ModelRepository, RepositoryLifecycle, RepositoryListener,
    RepositoryResult, RepositoryStatus, Resource, TracingListener,
};
pub use results::{AggregatedResult, BenchmarkResult};
