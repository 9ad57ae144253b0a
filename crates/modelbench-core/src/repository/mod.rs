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

//! Model repository abstraction.
//!
//! A model repository is a pluggable storage backend under measurement. All
//! backends expose the same lifecycle (start, stop, restart, clean) and the
//! same model operations, so the harness never branches on the backend.
//!
//! - `lifecycle`: status machine shared by every backend
//! - `listener`: status and event observers
//! - `resource`: addressable container of stored nodes

pub mod lifecycle;
pub mod listener;
pub mod resource;

pub use lifecycle::{LifecycleHooks, RepositoryLifecycle};
pub use listener::{EventLevel, RepositoryListener, TracingListener};
pub use resource::{random_id, Resource};

use crate::error::RepositoryError;
use crate::model::{BenchmarkModel, Node};
use std::fmt;
use std::sync::Arc;

/// Result type of repository operations.
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Lifecycle state of a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryStatus {
    Starting,
    Running,
    Stopping,
    Stopped,
    Restarting,
    Cleaning,
    /// Terminal for the current run.
    Error,
}

impl fmt::Display for RepositoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RepositoryStatus::Starting => "STARTING",
            RepositoryStatus::Running => "RUNNING",
            RepositoryStatus::Stopping => "STOPPING",
            RepositoryStatus::Stopped => "STOPPED",
            RepositoryStatus::Restarting => "RESTARTING",
            RepositoryStatus::Cleaning => "CLEANING",
            RepositoryStatus::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// A storage backend under measurement.
///
/// Lifecycle methods never fail: failures are reported to listeners and
/// reflected as [`RepositoryStatus::Error`]. Model operations return
/// [`RepositoryError`] and are expected to run while the repository is
/// [`RepositoryStatus::Running`].
pub trait ModelRepository: Send + Sync {
    /// Unique name used for lookup and reporting.
    fn name(&self) -> &str;

    /// Human readable location of the backing store.
    fn uri(&self) -> String;

    fn status(&self) -> RepositoryStatus;

    fn start(&self);

    fn stop(&self);

    fn restart(&self);

    /// Removes all persisted state, restoring the status afterwards.
    fn clean(&self);

    /// Whether the backend can be used at all, independent of its status.
    fn is_available(&self) -> bool {
        true
    }

    /// Whether the case with this name should run against this repository.
    fn supports(&self, _case_name: &str) -> bool {
        true
    }

    fn add_listener(&self, listener: Arc<dyn RepositoryListener>);

    fn remove_listener(&self, listener: &Arc<dyn RepositoryListener>) -> bool;

    fn contains_listener(&self, listener: &Arc<dyn RepositoryListener>) -> bool;

    /// Converts a generic model into the representation this backend stores.
    fn adapt_model(&self, model: &BenchmarkModel) -> BenchmarkModel {
        model.clone()
    }

    /// Creates an empty, not yet persisted resource.
    fn create_resource(&self) -> RepositoryResult<Resource>;

    /// Persists the resource and its contents.
    fn save(&self, resource: &Resource) -> RepositoryResult<()>;

    /// Persists the model in a new resource and returns its URI.
    fn save_model(&self, model: &BenchmarkModel) -> RepositoryResult<String> {
        let mut resource = self.create_resource()?;
        if let Some(root) = model.root() {
            resource.contents.push(root.clone());
        }
        self.save(&resource)?;
        Ok(resource.uri().to_string())
    }

    /// Loads a persisted resource.
    fn load_resource(&self, uri: &str) -> RepositoryResult<Resource>;

    /// Releases a loaded resource and anything the backend cached for it.
    fn unload_resource(&self, resource: Resource) -> RepositoryResult<()> {
        drop(resource);
        Ok(())
    }

    /// Loads one root node of a persisted resource.
    fn load_node(&self, uri: &str, index: usize) -> RepositoryResult<Node> {
        let mut resource = self.load_resource(uri)?;
        if index < resource.contents.len() {
            Ok(resource.contents.swap_remove(index))
        } else {
            Err(RepositoryError::ResourceNotFound(format!("{}#{}", uri, index)))
        }
    }
}

impl fmt::Debug for dyn ModelRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRepository")
            .field("name", &self.name())
            .field("status", &self.status())
            .finish()
    }
}
