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

//! Benchmark execution harness.
//!
//! - `case`: the per-trial workflow around case-specific hooks
//! - `group`: named collections of cases
//! - `registry`: repository and group registries
//! - `manager`: orchestration, progress and cooperative stop

pub mod case;
pub mod group;
pub mod manager;
pub mod registry;

pub use case::{
    case_name_from_type, default_set_up, default_tear_down, BenchmarkCase, BenchmarkData,
    CaseLogic, ModelSource,
};
pub use group::BenchmarkGroup;
pub use manager::{BenchmarkManager, Progress, ProgressObserver, RunResults, StopHandle};
pub use registry::{GroupRegistry, Registry, RepositoryRegistry};
