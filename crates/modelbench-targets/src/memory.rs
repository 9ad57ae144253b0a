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

//! In-process repository.

use modelbench_core::{
    LifecycleHooks, ModelRepository, Node, RepositoryError, RepositoryLifecycle,
    RepositoryListener, RepositoryResult, RepositoryStatus, Resource,
};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Name the memory repository registers under.
pub const MEMORY_REPOSITORY_NAME: &str = "MEM";

/// Repository keeping resources in a process-wide map.
///
/// Saved resources survive `stop` and `start`; only `clean` removes them.
/// Loaded resources are cached until the repository stops.
pub struct MemoryRepository {
    lifecycle: RepositoryLifecycle,
    store: RwLock<HashMap<String, Arc<Vec<Node>>>>,
    cache: Mutex<HashMap<String, Resource>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::with_name(MEMORY_REPOSITORY_NAME)
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            lifecycle: RepositoryLifecycle::new(name),
            store: RwLock::new(HashMap::new()),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of saved resources.
    pub fn resource_count(&self) -> usize {
        self.store.read().len()
    }

    /// Number of resources held in the load cache.
    pub fn cached_count(&self) -> usize {
        self.cache.lock().len()
    }

    fn ensure_running(&self) -> RepositoryResult<()> {
        match self.lifecycle.status() {
            RepositoryStatus::Running => Ok(()),
            _ => Err(RepositoryError::NotRunning(self.lifecycle.name().to_string())),
        }
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleHooks for MemoryRepository {
    fn open(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn release_cache(&self) {
        self.cache.lock().clear();
    }

    fn close(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn wipe(&self) -> Result<(), RepositoryError> {
        self.cache.lock().clear();
        self.store.write().clear();
        Ok(())
    }

    fn requires_offline_clean(&self) -> bool {
        false
    }
}

impl ModelRepository for MemoryRepository {
    fn name(&self) -> &str {
        self.lifecycle.name()
    }

    fn uri(&self) -> String {
        format!("memory://{}", self.lifecycle.name().to_lowercase())
    }

    fn status(&self) -> RepositoryStatus {
        self.lifecycle.status()
    }

    fn start(&self) {
        self.lifecycle.start(self)
    }

    fn stop(&self) {
        self.lifecycle.stop(self)
    }

    fn restart(&self) {
        self.lifecycle.restart(self)
    }

    fn clean(&self) {
        self.lifecycle.clean(self)
    }

    fn add_listener(&self, listener: Arc<dyn RepositoryListener>) {
        self.lifecycle.add_listener(listener)
    }

    fn remove_listener(&self, listener: &Arc<dyn RepositoryListener>) -> bool {
        self.lifecycle.remove_listener(listener)
    }

    fn contains_listener(&self, listener: &Arc<dyn RepositoryListener>) -> bool {
        self.lifecycle.contains_listener(listener)
    }

    fn create_resource(&self) -> RepositoryResult<Resource> {
        self.ensure_running()?;
        Ok(Resource::with_random_uri("mem"))
    }

    fn save(&self, resource: &Resource) -> RepositoryResult<()> {
        self.ensure_running()?;
        trace!("[{}] saving {} nodes to {}", self.name(), resource.size(), resource.uri());
        self.cache.lock().remove(resource.uri());
        self.store
            .write()
            .insert(resource.uri().to_string(), Arc::new(resource.contents.clone()));
        Ok(())
    }

    fn load_resource(&self, uri: &str) -> RepositoryResult<Resource> {
        self.ensure_running()?;
        if let Some(cached) = self.cache.lock().get(uri) {
            return Ok(cached.clone());
        }
        let contents = self
            .store
            .read()
            .get(uri)
            .cloned()
            .ok_or_else(|| RepositoryError::ResourceNotFound(uri.to_string()))?;
        let mut resource = Resource::new(uri);
        resource.contents = contents.as_ref().clone();
        self.cache.lock().insert(uri.to_string(), resource.clone());
        Ok(resource)
    }

    fn unload_resource(&self, resource: Resource) -> RepositoryResult<()> {
        self.cache.lock().remove(resource.uri());
        Ok(())
    }
}
