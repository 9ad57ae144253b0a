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

//! Command implementations.
//!
//! - `run`: one batch in the foreground
//! - `list`: registered repositories
//! - `console`: the interactive control surface
//! - `sample`: sample model files

mod console;
mod list;
mod run;
mod sample;

pub use console::console;
pub use list::list;
pub use run::run;
pub use sample::generate_sample;

use crate::cli::BenchOptions;
use crate::error::CliError;
use modelbench_core::{
    BenchmarkGroup, BenchmarkManager, GroupRegistry, RepositoryListener, RepositoryRegistry,
    TracingListener,
};
use modelbench_performance::PerformanceBenchmarkGroup;
use modelbench_targets::default_repositories;
use std::sync::Arc;
use tracing::debug;

/// Registers the bundled repositories and the performance group.
pub fn build_manager(options: &BenchOptions) -> Result<Arc<BenchmarkManager>, CliError> {
    let config = options.config();
    config.validate()?;

    let listener: Arc<dyn RepositoryListener> = Arc::new(TracingListener);
    let repositories = Arc::new(RepositoryRegistry::new());
    for repository in default_repositories(options.work_dir.as_deref())? {
        debug!("Registering repository {} at {}", repository.name(), repository.uri());
        repository.add_listener(Arc::clone(&listener));
        repositories.add(repository);
    }

    let group = if options.huge {
        PerformanceBenchmarkGroup::new().with_huge_traversal()
    } else {
        PerformanceBenchmarkGroup::new()
    };
    let group: Arc<dyn BenchmarkGroup> = Arc::new(group);
    let groups = Arc::new(GroupRegistry::new());
    groups.add(group);

    Ok(Arc::new(BenchmarkManager::new(repositories, groups, config)))
}
