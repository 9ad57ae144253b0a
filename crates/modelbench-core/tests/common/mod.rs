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

//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use chrono::Utc;
use modelbench_core::repository::RepositoryResult;
use modelbench_core::{
    BenchmarkCase, BenchmarkGroup, BenchmarkModel, CaseLogic, HeapSnapshot, LifecycleHooks,
    MemoryProbe, ModelRepository, ModelSource, RepositoryError, RepositoryLifecycle,
    RepositoryListener, RepositoryStatus, Resource, Result,
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Shared, ordered call log.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.lock().iter().filter(|e| *e == entry).count()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

/// Probe with constant figures.
pub struct FixedProbe;

impl MemoryProbe for FixedProbe {
    fn snapshot(&self) -> HeapSnapshot {
        HeapSnapshot {
            timestamp: Utc::now(),
            used_mb: 10,
            free_mb: 90,
            total_available_mb: 100,
            max_available_mb: 100,
        }
    }

    fn max_available_mb(&self) -> u64 {
        100
    }
}

/// In-memory repository that records every lifecycle and model call.
pub struct RecordingRepository {
    lifecycle: RepositoryLifecycle,
    log: CallLog,
    store: Mutex<HashMap<String, Vec<modelbench_core::Node>>>,
    available: bool,
    fail_open: bool,
    unsupported: HashSet<String>,
}

impl RecordingRepository {
    pub fn new(name: &str, log: CallLog) -> Self {
        Self {
            lifecycle: RepositoryLifecycle::new(name),
            log,
            store: Mutex::new(HashMap::new()),
            available: true,
            fail_open: false,
            unsupported: HashSet::new(),
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn failing_start(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn without_case(mut self, case: &str) -> Self {
        self.unsupported.insert(case.to_string());
        self
    }

    fn record(&self, op: &str) {
        self.log.push(format!("{}:{}", self.lifecycle.name(), op));
    }

    fn ensure_running(&self) -> RepositoryResult<()> {
        if self.lifecycle.status() == RepositoryStatus::Running {
            Ok(())
        } else {
            Err(RepositoryError::NotRunning(self.lifecycle.name().to_string()))
        }
    }
}

impl LifecycleHooks for RecordingRepository {
    fn open(&self) -> std::result::Result<(), RepositoryError> {
        self.record("open");
        if self.fail_open {
            Err(RepositoryError::Backend("connection refused".into()))
        } else {
            Ok(())
        }
    }

    fn close(&self) -> std::result::Result<(), RepositoryError> {
        self.record("close");
        Ok(())
    }

    fn wipe(&self) -> std::result::Result<(), RepositoryError> {
        self.record("wipe");
        self.store.lock().clear();
        Ok(())
    }
}

impl ModelRepository for RecordingRepository {
    fn name(&self) -> &str {
        self.lifecycle.name()
    }

    fn uri(&self) -> String {
        format!("recording://{}", self.name())
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
        self.record("clean");
        self.lifecycle.clean(self)
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn supports(&self, case_name: &str) -> bool {
        !self.unsupported.contains(case_name)
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
        Ok(Resource::with_random_uri("recording"))
    }

    fn save(&self, resource: &Resource) -> RepositoryResult<()> {
        self.ensure_running()?;
        self.record("save");
        self.store
            .lock()
            .insert(resource.uri().to_string(), resource.contents.clone());
        Ok(())
    }

    fn load_resource(&self, uri: &str) -> RepositoryResult<Resource> {
        self.ensure_running()?;
        let contents = self
            .store
            .lock()
            .get(uri)
            .cloned()
            .ok_or_else(|| RepositoryError::ResourceNotFound(uri.to_string()))?;
        let mut resource = Resource::new(uri);
        resource.contents = contents;
        Ok(resource)
    }
}

/// What a scripted case does when measured.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Succeed,
    Fail,
    Panic,
    FailSetUp,
    /// Reads its model from a file that does not exist.
    MissingModel,
}

/// Case whose hooks record into a log and fail on demand.
pub struct ScriptedCase {
    pub name: String,
    pub behavior: Behavior,
    pub log: CallLog,
}

impl ScriptedCase {
    pub fn new(name: &str, behavior: Behavior, log: CallLog) -> Self {
        Self {
            name: name.to_string(),
            behavior,
            log,
        }
    }
}

impl CaseLogic for ScriptedCase {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn model_source(&self) -> ModelSource {
        if self.behavior == Behavior::MissingModel {
            ModelSource::File("/nonexistent/modelbench/model.json".into())
        } else {
            ModelSource::Void
        }
    }

    fn set_up(&mut self, repository: &dyn ModelRepository, _: &BenchmarkModel) -> Result<()> {
        self.log.push(format!("{}@{}:set_up", self.name, repository.name()));
        if self.behavior == Behavior::FailSetUp {
            return Err(RepositoryError::Backend("set up refused".into()).into());
        }
        modelbench_core::default_set_up(repository)
    }

    fn measure(&mut self, repository: &dyn ModelRepository, _: &BenchmarkModel) -> Result<()> {
        self.log.push(format!("{}@{}:measure", self.name, repository.name()));
        match self.behavior {
            Behavior::Fail => Err(RepositoryError::Backend("measure failed".into()).into()),
            Behavior::Panic => panic!("measure panicked"),
            _ => Ok(()),
        }
    }

    fn tear_down(&mut self, repository: &dyn ModelRepository, _: &BenchmarkModel) -> Result<()> {
        self.log.push(format!("{}@{}:tear_down", self.name, repository.name()));
        modelbench_core::default_tear_down(repository);
        Ok(())
    }
}

/// Group of scripted cases.
pub struct ScriptedGroup {
    pub cases: Vec<(String, Behavior)>,
    pub log: CallLog,
}

impl BenchmarkGroup for ScriptedGroup {
    fn name(&self) -> &str {
        "Scripted"
    }

    fn cases(&self) -> Vec<BenchmarkCase> {
        self.cases
            .iter()
            .map(|(name, behavior)| {
                BenchmarkCase::new(ScriptedCase::new(name, *behavior, self.log.clone()))
            })
            .collect()
    }
}
