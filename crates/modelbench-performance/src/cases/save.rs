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

//! Model save cases.

use modelbench_core::{
    default_set_up, default_tear_down, BenchmarkModel, CaseLogic, ModelRepository, ModelSource,
    Node, Resource, Result,
};

/// Node count range of the minimal save case.
pub const MINIMAL_MODEL_COUNT: (usize, usize) = (1, 10);
/// Node count range of the big save case.
pub const BIG_MODEL_COUNT: (usize, usize) = (1_000, 2_000);

/// Measures saving a random model into an already persisted resource.
///
/// The model properties are drawn once per case from the count range, so
/// every trial of a run saves a model of the same shape.
#[derive(Debug)]
pub struct ModelSaveCase {
    name: &'static str,
    lower: usize,
    upper: usize,
    resource: Option<Resource>,
    pending: Option<Node>,
}

impl ModelSaveCase {
    pub fn new(name: &'static str, lower: usize, upper: usize) -> Self {
        Self {
            name,
            lower,
            upper,
            resource: None,
            pending: None,
        }
    }

    /// 1 to 10 nodes.
    pub fn minimal() -> Self {
        Self::new("MinimalModelSave", MINIMAL_MODEL_COUNT.0, MINIMAL_MODEL_COUNT.1)
    }

    /// 1000 to 2000 nodes.
    pub fn big() -> Self {
        Self::new("BigModelSave", BIG_MODEL_COUNT.0, BIG_MODEL_COUNT.1)
    }
}

impl CaseLogic for ModelSaveCase {
    fn name(&self) -> String {
        self.name.to_string()
    }

    fn model_source(&self) -> ModelSource {
        ModelSource::Random {
            lower: self.lower,
            upper: self.upper,
        }
    }

    fn set_up(&mut self, repository: &dyn ModelRepository, model: &BenchmarkModel) -> Result<()> {
        default_set_up(repository)?;
        let resource = repository.create_resource()?;
        repository.save(&resource)?;
        self.resource = Some(resource);
        // cloned here so the copy stays out of the measurement
        self.pending = model.root().cloned();
        Ok(())
    }

    fn measure(&mut self, repository: &dyn ModelRepository, _: &BenchmarkModel) -> Result<()> {
        if let Some(resource) = self.resource.as_mut() {
            resource.contents.extend(self.pending.take());
            repository.save(resource)?;
        }
        Ok(())
    }

    fn tear_down(&mut self, repository: &dyn ModelRepository, _: &BenchmarkModel) -> Result<()> {
        default_tear_down(repository);
        self.resource = None;
        self.pending = None;
        Ok(())
    }
}
