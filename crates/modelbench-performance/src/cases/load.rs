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

//! Resource load case.

use modelbench_core::{
    default_set_up, BenchError, BenchmarkModel, CaseLogic, ModelRepository, ModelSource, Result,
    SampleModel,
};

/// Measures loading a persisted 100 node resource.
#[derive(Debug, Default)]
pub struct ResourceLoadCase {
    uri: Option<String>,
}

impl CaseLogic for ResourceLoadCase {
    fn name(&self) -> String {
        "ResourceLoad".to_string()
    }

    fn model_source(&self) -> ModelSource {
        ModelSource::Sample(SampleModel::Size100)
    }

    fn set_up(&mut self, repository: &dyn ModelRepository, model: &BenchmarkModel) -> Result<()> {
        default_set_up(repository)?;
        let mut resource = repository.create_resource()?;
        self.uri = Some(resource.uri().to_string());
        resource.contents.extend(model.root().cloned());
        repository.save(&resource)?;
        repository.unload_resource(resource)?;
        Ok(())
    }

    fn measure(&mut self, repository: &dyn ModelRepository, _: &BenchmarkModel) -> Result<()> {
        let uri = self.uri.as_deref().ok_or_else(|| BenchError::CaseFailed {
            case: self.name(),
            reason: "no resource was saved during set up".to_string(),
        })?;
        repository.load_resource(uri)?;
        Ok(())
    }
}
