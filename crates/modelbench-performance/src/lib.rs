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

//! Dweve ModelBench performance group
//!
//! Measures the basic operations every model repository offers: starting
//! up, creating resources, saving models of different sizes, loading them
//! back and traversing them with and without warm caches.
//!
//! ## Usage
//!
//! ```no_run
//! use modelbench_core::{BenchmarkGroup, GroupRegistry};
//! use modelbench_performance::PerformanceBenchmarkGroup;
//! use std::sync::Arc;
//!
//! let groups = GroupRegistry::new();
//! let group: Arc<dyn BenchmarkGroup> = Arc::new(PerformanceBenchmarkGroup::new());
//! groups.add(group);
//! ```

pub mod cases;
pub mod group;

pub use cases::{
    ModelSaveCase, ModelTraversalCase, RepositorySetupCase, ResourceCreationCase,
    ResourceLoadCase,
};
pub use group::{PerformanceBenchmarkGroup, GROUP_NAME};
