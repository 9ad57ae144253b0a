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

//! Shared status machine for repository backends.
//!
//! Backends own a [`RepositoryLifecycle`] and implement [`LifecycleHooks`]
//! for the few operations that actually touch their storage. The lifecycle
//! drives the hooks through the status transitions and reports failures to
//! listeners instead of returning them.

use super::listener::{EventLevel, RepositoryListener};
use super::RepositoryStatus;
use crate::error::RepositoryError;
use parking_lot::{Mutex, RwLock};
use std::error::Error;
use std::sync::Arc;

type ListenerList = Arc<Vec<Arc<dyn RepositoryListener>>>;

/// Storage operations invoked by [`RepositoryLifecycle`].
pub trait LifecycleHooks: Send + Sync {
    /// Connects to or opens the backing store.
    fn open(&self) -> Result<(), RepositoryError>;

    /// Drops cached model state. Called before every close.
    fn release_cache(&self) {}

    /// Disconnects from the backing store.
    fn close(&self) -> Result<(), RepositoryError>;

    /// Removes all persisted state.
    fn wipe(&self) -> Result<(), RepositoryError>;

    /// Whether the store must be closed while it is wiped.
    fn requires_offline_clean(&self) -> bool {
        true
    }
}

/// Status and listeners of one repository.
pub struct RepositoryLifecycle {
    name: String,
    status: Mutex<RepositoryStatus>,
    listeners: RwLock<ListenerList>,
}

impl RepositoryLifecycle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Mutex::new(RepositoryStatus::Stopped),
            listeners: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> RepositoryStatus {
        *self.status.lock()
    }

    /// Stores `new` and notifies listeners if it differs from the old status.
    pub fn set_status(&self, new: RepositoryStatus) {
        let old = std::mem::replace(&mut *self.status.lock(), new);
        if old != new {
            for listener in self.snapshot().iter() {
                listener.status_changed(&self.name, old, new);
            }
        }
    }

    /// Sends an event to every listener.
    pub fn notify(&self, level: EventLevel, message: &str, cause: Option<&(dyn Error + 'static)>) {
        for listener in self.snapshot().iter() {
            listener.repository_event(&self.name, level, message, cause);
        }
    }

    fn snapshot(&self) -> ListenerList {
        let guard = self.listeners.read();
        Arc::clone(&*guard)
    }

    /// Registers a listener. Registering the same listener twice has no effect.
    pub fn add_listener(&self, listener: Arc<dyn RepositoryListener>) {
        let mut guard = self.listeners.write();
        if guard.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            return;
        }
        let mut next = Vec::clone(&guard);
        next.push(listener);
        *guard = Arc::new(next);
    }

    /// Removes a listener, returning whether it was registered.
    pub fn remove_listener(&self, listener: &Arc<dyn RepositoryListener>) -> bool {
        let mut guard = self.listeners.write();
        let before = guard.len();
        let next: Vec<_> = guard
            .iter()
            .filter(|l| !Arc::ptr_eq(l, listener))
            .cloned()
            .collect();
        let removed = next.len() != before;
        *guard = Arc::new(next);
        removed
    }

    pub fn contains_listener(&self, listener: &Arc<dyn RepositoryListener>) -> bool {
        self.listeners.read().iter().any(|l| Arc::ptr_eq(l, listener))
    }

    /// STOPPED -> STARTING -> RUNNING, or ERROR if opening fails.
    pub fn start(&self, hooks: &dyn LifecycleHooks) {
        if self.status() == RepositoryStatus::Running {
            return;
        }
        self.set_status(RepositoryStatus::Starting);
        self.open(hooks);
    }

    fn open(&self, hooks: &dyn LifecycleHooks) {
        match hooks.open() {
            Ok(()) => self.set_status(RepositoryStatus::Running),
            Err(e) => {
                self.notify(EventLevel::Error, "Could not start the repository", Some(&e));
                self.set_status(RepositoryStatus::Error);
            }
        }
    }

    /// RUNNING -> STOPPING -> STOPPED. Always ends STOPPED.
    pub fn stop(&self, hooks: &dyn LifecycleHooks) {
        if self.status() == RepositoryStatus::Stopped {
            return;
        }
        self.set_status(RepositoryStatus::Stopping);
        self.close(hooks);
        self.set_status(RepositoryStatus::Stopped);
    }

    fn close(&self, hooks: &dyn LifecycleHooks) {
        hooks.release_cache();
        if let Err(e) = hooks.close() {
            self.notify(EventLevel::Warn, "Error while stopping the repository", Some(&e));
        }
    }

    /// Stops and starts again, reporting RESTARTING in between.
    pub fn restart(&self, hooks: &dyn LifecycleHooks) {
        let previous = self.status();
        self.set_status(RepositoryStatus::Restarting);
        if previous != RepositoryStatus::Stopped {
            self.close(hooks);
        }
        self.open(hooks);
    }

    /// Wipes persisted state and restores the pre-clean status.
    ///
    /// Offline cleaning stops a live store first and restarts it afterwards
    /// if it was running. A failed restart leaves the status at ERROR.
    pub fn clean(&self, hooks: &dyn LifecycleHooks) {
        let original = self.status();
        let offline = hooks.requires_offline_clean();
        if offline && original != RepositoryStatus::Stopped {
            self.stop(hooks);
        }

        self.set_status(RepositoryStatus::Cleaning);
        if let Err(e) = hooks.wipe() {
            self.notify(EventLevel::Error, "Error while cleaning the repository", Some(&e));
        }

        if offline && original == RepositoryStatus::Running {
            self.open(hooks);
            if self.status() == RepositoryStatus::Error {
                return;
            }
        }
        self.set_status(original);
    }
}
