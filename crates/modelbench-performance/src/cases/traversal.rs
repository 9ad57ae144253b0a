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

//! Model traversal cases.
//!
//! The sample model is persisted during set up and loaded back before
//! measuring. Without caching the repository is restarted in between, so
//! the load cannot be served from anything the save left behind.

use modelbench_core::{
    default_set_up, default_tear_down, BenchError, BenchmarkModel, CaseLogic, ModelRepository,
    ModelSource, Resource, Result, SampleModel,
};
use std::hint::black_box;
use tracing::trace;

/// Measures visiting every node of a loaded sample model.
#[derive(Debug)]
pub struct ModelTraversalCase {
    name: &'static str,
    sample: SampleModel,
    caching: bool,
    resource: Option<Resource>,
}

impl ModelTraversalCase {
    pub fn new(name: &'static str, sample: SampleModel, caching: bool) -> Self {
        Self {
            name,
            sample,
            caching,
            resource: None,
        }
    }

    /// 1K sample, repository restarted before loading.
    pub fn no_caching() -> Self {
        Self::new("ModelTraversalNoCaching", SampleModel::Size1K, false)
    }

    /// 1K sample, loaded from the running repository.
    pub fn caching() -> Self {
        Self::new("ModelTraversalCaching", SampleModel::Size1K, true)
    }

    /// 10K sample, repository restarted before loading.
    pub fn big_no_caching() -> Self {
        Self::new("BigModelTraversalNoCaching", SampleModel::Size10K, false)
    }

    /// 100K sample, repository restarted before loading.
    pub fn huge_no_caching() -> Self {
        Self::new("HugeModelTraversalNoCaching", SampleModel::Size100K, false)
    }

    pub fn is_caching(&self) -> bool {
        self.caching
    }

    fn missing(&self, reason: &str) -> BenchError {
        BenchError::CaseFailed {
            case: self.name.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl CaseLogic for ModelTraversalCase {
    fn name(&self) -> String {
        self.name.to_string()
    }

    fn model_source(&self) -> ModelSource {
        ModelSource::Sample(self.sample)
    }

    fn set_up(&mut self, repository: &dyn ModelRepository, model: &BenchmarkModel) -> Result<()> {
        default_set_up(repository)?;

        let mut resource = repository.create_resource()?;
        resource.contents.extend(model.root().cloned());
        repository.save(&resource)?;
        let uri = resource.uri().to_string();
        drop(resource);

        if !self.caching {
            trace!("[{}] restarting before load", repository.name());
            repository.restart();
        }
        self.resource = Some(repository.load_resource(&uri)?);
        Ok(())
    }

    fn measure(&mut self, _: &dyn ModelRepository, _: &BenchmarkModel) -> Result<()> {
        let resource = self
            .resource
            .as_ref()
            .ok_or_else(|| self.missing("resource was not loaded"))?;
        let root = resource
            .contents
            .first()
            .ok_or_else(|| self.missing("loaded resource is empty"))?;
        for node in root.iter().skip(1) {
            black_box(node);
        }
        Ok(())
    }

    fn tear_down(&mut self, repository: &dyn ModelRepository, _: &BenchmarkModel) -> Result<()> {
        let unloaded = match self.resource.take() {
            Some(resource) => repository.unload_resource(resource),
            None => Ok(()),
        };
        default_tear_down(repository);
        unloaded?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_and_samples() {
        let cases = [
            ModelTraversalCase::no_caching(),
            ModelTraversalCase::caching(),
            ModelTraversalCase::big_no_caching(),
            ModelTraversalCase::huge_no_caching(),
        ];
        let names: Vec<_> = cases.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "ModelTraversalNoCaching",
                "ModelTraversalCaching",
                "BigModelTraversalNoCaching",
                "HugeModelTraversalNoCaching",
            ]
        );
        assert!(cases[1].is_caching());
        assert_eq!(
            cases[3].model_source(),
            ModelSource::Sample(SampleModel::Size100K)
        );
    }

    #[test]
    fn test_measure_without_set_up_fails() {
        let mut case = ModelTraversalCase::no_caching();
        let repo = modelbench_targets::MemoryRepository::new();
        let err = case.measure(&repo, &BenchmarkModel::void()).unwrap_err();
        assert!(matches!(err, BenchError::CaseFailed { .. }));
    }
}
