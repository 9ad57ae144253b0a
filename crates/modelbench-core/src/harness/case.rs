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

//! Case workflow.
//!
//! A case is one measurable operation. [`CaseLogic`] supplies the
//! case-specific hooks and [`BenchmarkCase`] runs them in a fixed order:
//!
//! 1. acquire the model (cached until [`BenchmarkCase::reset`])
//! 2. adapt it to the repository
//! 3. `set_up`
//! 4. start the meter, `measure`, stop the meter
//! 5. `tear_down`, on every exit path
//! 6. build the trial result
//!
//! Errors and panics in steps 3 and 4 mark the trial as failed; they are
//! logged and never abort the batch.

use crate::config::DEFAULT_POLLING_INTERVAL;
use crate::error::{BenchError, Result};
use crate::generators::{warm_up_properties, ModelGenerator, SampleModel};
use crate::measurement::{Meter, MemoryProbe, SystemMemoryProbe};
use crate::model::{BenchmarkModel, ModelProperties};
use crate::repository::{ModelRepository, RepositoryStatus};
use crate::results::BenchmarkResult;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, trace};

/// Where a case gets its model from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// No model at all.
    Void,
    /// Generated with fixed properties.
    Generated(ModelProperties),
    /// Generated with random properties drawn once per case from `[lower, upper)`.
    Random { lower: usize, upper: usize },
    /// One of the fixed samples.
    Sample(SampleModel),
    /// A model file written by [`BenchmarkModel::save_json`].
    File(PathBuf),
}

/// Per-trial input handed to a case.
#[derive(Clone)]
pub struct BenchmarkData {
    pub repository: Arc<dyn ModelRepository>,
    /// 1-based iteration number.
    pub iteration: u32,
    pub options: HashMap<String, String>,
}

impl BenchmarkData {
    pub fn new(repository: Arc<dyn ModelRepository>) -> Self {
        Self {
            repository,
            iteration: 1,
            options: HashMap::new(),
        }
    }

    pub fn with_iteration(mut self, iteration: u32) -> Self {
        self.iteration = iteration;
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Case-specific hooks.
pub trait CaseLogic: Send {
    /// Case name. Defaults to the type name without its `Case` suffix.
    fn name(&self) -> String {
        case_name_from_type(std::any::type_name_of_val(self))
    }

    fn model_source(&self) -> ModelSource {
        ModelSource::Void
    }

    /// Prepares the repository. Defaults to [`default_set_up`].
    fn set_up(&mut self, repository: &dyn ModelRepository, _model: &BenchmarkModel) -> Result<()> {
        default_set_up(repository)
    }

    /// The measured operation.
    fn measure(&mut self, repository: &dyn ModelRepository, model: &BenchmarkModel) -> Result<()>;

    /// Restores the repository. Defaults to [`default_tear_down`].
    fn tear_down(
        &mut self,
        repository: &dyn ModelRepository,
        _model: &BenchmarkModel,
    ) -> Result<()> {
        default_tear_down(repository);
        Ok(())
    }
}

/// Starts the repository if needed and writes a one-node warm-up model.
pub fn default_set_up(repository: &dyn ModelRepository) -> Result<()> {
    if repository.status() != RepositoryStatus::Running {
        trace!("Setup: Starting repository {}", repository.name());
        repository.start();
        trace!("Setup: Finished starting repository {}", repository.name());
    }
    warm_up(repository)
}

/// Stops the repository if it is running and cleans it.
pub fn default_tear_down(repository: &dyn ModelRepository) {
    if repository.status() == RepositoryStatus::Running {
        repository.stop();
    }
    repository.clean();
}

fn warm_up(repository: &dyn ModelRepository) -> Result<()> {
    let mut resource = repository.create_resource()?;
    let model = ModelGenerator::new().generate(&warm_up_properties())?;
    let adapted = repository.adapt_model(&model);
    if let Some(root) = adapted.into_root() {
        resource.contents.push(root);
    }
    repository.save(&resource)?;
    Ok(())
}

/// Last path segment of a type name with a trailing `Case` removed.
pub fn case_name_from_type(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    let simple = base.rsplit("::").next().unwrap_or(base);
    match simple.rfind("Case") {
        Some(index) if index > 0 => simple[..index].to_string(),
        _ => simple.to_string(),
    }
}

/// A case bound to its meter and cached model.
pub struct BenchmarkCase {
    logic: Box<dyn CaseLogic>,
    name: String,
    meter: Meter,
    generator: ModelGenerator,
    sample_dir: Option<PathBuf>,
    model: Option<Arc<BenchmarkModel>>,
    properties: Option<ModelProperties>,
    last_repository: Option<String>,
    last_error: Option<BenchError>,
}

impl BenchmarkCase {
    pub fn new(logic: impl CaseLogic + 'static) -> Self {
        Self::from_boxed(Box::new(logic))
    }

    pub fn from_boxed(logic: Box<dyn CaseLogic>) -> Self {
        let name = logic.name();
        Self {
            logic,
            name,
            meter: Meter::new(DEFAULT_POLLING_INTERVAL, Arc::new(SystemMemoryProbe::new())),
            generator: ModelGenerator::new(),
            sample_dir: None,
            model: None,
            properties: None,
            last_repository: None,
            last_error: None,
        }
    }

    /// Replaces the meter with one using the given interval and probe.
    pub fn configure_meter(&mut self, polling_interval: Duration, probe: Arc<dyn MemoryProbe>) {
        self.meter = Meter::new(polling_interval, probe);
    }

    /// Reads sample models from `dir` instead of generating them.
    pub fn set_sample_dir(&mut self, dir: Option<PathBuf>) {
        self.sample_dir = dir;
    }

    /// Uses a seeded generator for model generation.
    pub fn with_generator(mut self, generator: ModelGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn last_repository(&self) -> Option<&str> {
        self.last_repository.as_deref()
    }

    /// Error or panic of the last trial, if any.
    pub fn last_error(&self) -> Option<&BenchError> {
        self.last_error.as_ref()
    }

    pub fn has_cached_model(&self) -> bool {
        self.model.is_some()
    }

    /// Properties of the case model, computed once per case.
    pub fn properties(&mut self) -> Result<ModelProperties> {
        if let Some(props) = self.properties {
            return Ok(props);
        }
        let props = match self.logic.model_source() {
            ModelSource::Void => ModelProperties::default(),
            ModelSource::Generated(props) => props,
            ModelSource::Random { lower, upper } => {
                self.generator.generate_random_properties(lower, upper)?
            }
            ModelSource::Sample(_) | ModelSource::File(_) => self.benchmark_model()?.properties(0)?,
        };
        self.properties = Some(props);
        Ok(props)
    }

    /// The case model, generated or loaded on first use.
    pub fn benchmark_model(&mut self) -> Result<Arc<BenchmarkModel>> {
        if let Some(model) = &self.model {
            return Ok(Arc::clone(model));
        }
        let model = match self.logic.model_source() {
            ModelSource::Void => BenchmarkModel::void(),
            ModelSource::Generated(_) | ModelSource::Random { .. } => {
                let props = self.properties()?;
                self.generator.generate(&props)?
            }
            ModelSource::Sample(sample) => sample.load(self.sample_dir.as_deref())?,
            ModelSource::File(path) => BenchmarkModel::load_json(&path)?,
        };
        let model = Arc::new(model);
        self.model = Some(Arc::clone(&model));
        Ok(model)
    }

    /// Runs one trial against the repository in `data`.
    ///
    /// Only a failure to acquire the model is returned as an error; hook
    /// failures produce a result flagged as failed.
    pub fn execute_benchmark(&mut self, data: &BenchmarkData) -> Result<BenchmarkResult> {
        let repository = data.repository.as_ref();
        let repo_name = repository.name().to_string();
        self.last_repository = Some(repo_name.clone());
        self.last_error = None;
        self.meter.reset();

        debug!("[{}] Preparing benchmark", repo_name);
        trace!("[{}] getting benchmark model", repo_name);
        let model = self.benchmark_model()?;
        let properties = self.properties()?;
        trace!("[{}] adapting benchmark model to repo", repo_name);
        let adapted = repository.adapt_model(&model);

        let mut failed = false;
        let outcome = {
            let logic = &mut self.logic;
            let meter = &mut self.meter;
            let repo_name = repo_name.as_str();
            panic::catch_unwind(AssertUnwindSafe(|| -> Result<bool> {
                trace!("[{}] Setting up case", repo_name);
                logic.set_up(repository, &adapted)?;
                let mut failed = repository.status() == RepositoryStatus::Error;
                trace!("[{}] Finished setting up case", repo_name);

                debug!("[{}] Starting benchmark", repo_name);
                meter.start_measuring()?;
                let measured = logic.measure(repository, &adapted);
                meter.stop_measuring();
                measured?;
                failed |= repository.status() == RepositoryStatus::Error;
                debug!("[{}] Finished benchmark", repo_name);
                Ok(failed)
            }))
        };
        if self.meter.is_running() {
            self.meter.stop_measuring();
        }
        match outcome {
            Ok(Ok(status_failed)) => failed |= status_failed,
            Ok(Err(e)) => {
                failed = true;
                self.record_failure(&repo_name, e.to_string());
            }
            Err(payload) => {
                failed = true;
                self.record_panic(&repo_name, payload);
            }
        }

        trace!("[{}] Tearing down case", repo_name);
        let logic = &mut self.logic;
        match panic::catch_unwind(AssertUnwindSafe(|| logic.tear_down(repository, &adapted))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                failed = true;
                self.record_failure(&repo_name, format!("tear down: {}", e));
            }
            Err(payload) => {
                failed = true;
                self.record_panic(&repo_name, payload);
            }
        }
        trace!("[{}] Finished tearing down case", repo_name);

        let reading = self.meter.result().unwrap_or_default();
        Ok(BenchmarkResult::new(self.name.clone(), repo_name, reading)
            .with_properties(properties)
            .with_failed(failed))
    }

    fn record_failure(&mut self, repo_name: &str, reason: String) {
        let err = BenchError::CaseFailed {
            case: self.name.clone(),
            reason,
        };
        error!("[{}] {}", repo_name, err);
        self.last_error.get_or_insert(err);
    }

    fn record_panic(&mut self, repo_name: &str, payload: Box<dyn Any + Send>) {
        let err = BenchError::CasePanicked {
            case: self.name.clone(),
            message: panic_message(payload.as_ref()),
        };
        error!("[{}] {}", repo_name, err);
        self.last_error.get_or_insert(err);
    }

    /// Drops the cached model and the per-trial bookkeeping.
    ///
    /// The case properties survive, so the next model has the same shape.
    pub fn reset(&mut self) {
        self.model = None;
        self.last_repository = None;
        self.last_error = None;
        self.meter.reset();
    }
}

impl std::fmt::Debug for BenchmarkCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkCase")
            .field("name", &self.name)
            .field("cached_model", &self.model.is_some())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ResourceCreationCase;

    impl CaseLogic for ResourceCreationCase {
        fn measure(&mut self, _: &dyn ModelRepository, _: &BenchmarkModel) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_case_name_from_type() {
        assert_eq!(
            case_name_from_type("my_crate::cases::ResourceCreationCase"),
            "ResourceCreation"
        );
        assert_eq!(case_name_from_type("Traversal"), "Traversal");
        assert_eq!(case_name_from_type("a::Case"), "Case");
        assert_eq!(case_name_from_type("a::WrapCase<b::Inner>"), "Wrap");
    }

    #[test]
    fn test_default_name_uses_type() {
        assert_eq!(ResourceCreationCase.name(), "ResourceCreation");
        let case = BenchmarkCase::new(ResourceCreationCase);
        assert_eq!(case.name(), "ResourceCreation");
    }

    struct GeneratedCase;

    impl CaseLogic for GeneratedCase {
        fn model_source(&self) -> ModelSource {
            ModelSource::Random { lower: 2, upper: 6 }
        }

        fn measure(&mut self, _: &dyn ModelRepository, _: &BenchmarkModel) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_model_cache_and_reset() {
        let mut case = BenchmarkCase::new(GeneratedCase).with_generator(ModelGenerator::with_seed(4));
        let props = case.properties().unwrap();
        let first = case.benchmark_model().unwrap();
        let again = case.benchmark_model().unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first.size(), props.count());

        case.reset();
        assert!(!case.has_cached_model());
        assert_eq!(case.properties().unwrap(), props);
        let regenerated = case.benchmark_model().unwrap();
        assert!(!Arc::ptr_eq(&first, &regenerated));
        assert_eq!(regenerated.size(), props.count());
    }

    #[test]
    fn test_panic_message() {
        let payload = panic::catch_unwind(|| panic!("boom {}", 1)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom 1");
    }
}
