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

//! Explicitly owned registries of repositories and case groups.
//!
//! Registries are plain values created by the process entry point and
//! handed to the [`BenchmarkManager`](super::manager::BenchmarkManager);
//! there is no process-wide instance.

use super::group::BenchmarkGroup;
use crate::repository::ModelRepository;
use parking_lot::RwLock;
use std::sync::Arc;

/// Ordered collection of shared items, de-duplicated by identity.
pub struct Registry<T: ?Sized> {
    items: RwLock<Vec<Arc<T>>>,
}

/// Registry of model repositories.
pub type RepositoryRegistry = Registry<dyn ModelRepository>;

/// Registry of case groups.
pub type GroupRegistry = Registry<dyn BenchmarkGroup>;

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl<T: ?Sized> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item. Returns false if this exact item is already registered.
    pub fn add(&self, item: Arc<T>) -> bool {
        let mut items = self.items.write();
        if items.iter().any(|i| Arc::ptr_eq(i, &item)) {
            return false;
        }
        items.push(item);
        true
    }

    /// Removes an item. Returns false if it was not registered.
    pub fn remove(&self, item: &Arc<T>) -> bool {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|i| !Arc::ptr_eq(i, item));
        items.len() != before
    }

    /// Snapshot of the registered items in registration order.
    pub fn list(&self) -> Vec<Arc<T>> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl Registry<dyn ModelRepository> {
    /// Finds a repository by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<Arc<dyn ModelRepository>> {
        self.items
            .read()
            .iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Repositories whose backend is currently reachable.
    pub fn available(&self) -> Vec<Arc<dyn ModelRepository>> {
        self.list().into_iter().filter(|r| r.is_available()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_deduplication() {
        let registry: Registry<str> = Registry::new();
        let a: Arc<str> = Arc::from("a");
        let a_again: Arc<str> = Arc::from("a");

        assert!(registry.add(Arc::clone(&a)));
        assert!(!registry.add(Arc::clone(&a)));
        assert!(registry.add(Arc::clone(&a_again)));
        assert_eq!(registry.len(), 2);

        assert!(registry.remove(&a));
        assert!(!registry.remove(&a));
        assert_eq!(registry.list().len(), 1);
    }
}
