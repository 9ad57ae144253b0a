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

//! Dweve ModelBench targets
//!
//! Concrete [`ModelRepository`](modelbench_core::ModelRepository) backends.
//! Each composes a [`RepositoryLifecycle`](modelbench_core::RepositoryLifecycle)
//! and only implements the storage hooks.
//!
//! ## Features
//!
//! - **MEM**: process-local map, cleaned online
//! - **FILE-JSON**: one JSON document per resource in a work directory
//! - **SQLITE**: single database file (enable the `sqlite` feature)

pub mod file;
pub mod memory;
pub mod records;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{FileRepository, FILE_REPOSITORY_NAME};
pub use memory::{MemoryRepository, MEMORY_REPOSITORY_NAME};
pub use records::{flatten, rebuild, NodeRecord};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteRepository, SQLITE_REPOSITORY_NAME};

use modelbench_core::{ModelRepository, RepositoryResult};
use std::path::Path;
use std::sync::Arc;

/// Every backend compiled into this crate.
///
/// File-backed targets keep their data below `work_dir`, or in temporary
/// directories when none is given.
pub fn default_repositories(
    work_dir: Option<&Path>,
) -> RepositoryResult<Vec<Arc<dyn ModelRepository>>> {
    let mut repositories: Vec<Arc<dyn ModelRepository>> = vec![Arc::new(MemoryRepository::new())];

    let file = match work_dir {
        Some(dir) => FileRepository::new(dir.join("file-json")),
        None => FileRepository::temporary()?,
    };
    repositories.push(Arc::new(file));

    #[cfg(feature = "sqlite")]
    {
        let dir = match work_dir {
            Some(dir) => dir.join("sqlite"),
            None => std::env::temp_dir().join("modelbench-sqlite"),
        };
        repositories.push(Arc::new(SqliteRepository::new(dir)));
    }

    Ok(repositories)
}
