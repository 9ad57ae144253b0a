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

//! Repository startup and empty resource cases.

use modelbench_core::{BenchmarkModel, CaseLogic, ModelRepository, Result};

/// Measures starting a stopped repository.
#[derive(Debug, Default)]
pub struct RepositorySetupCase;

impl CaseLogic for RepositorySetupCase {
    fn name(&self) -> String {
        "RepositorySetup".to_string()
    }

    // The repository must still be stopped when measuring starts.
    fn set_up(&mut self, _: &dyn ModelRepository, _: &BenchmarkModel) -> Result<()> {
        Ok(())
    }

    fn measure(&mut self, repository: &dyn ModelRepository, _: &BenchmarkModel) -> Result<()> {
        repository.start();
        Ok(())
    }
}

/// Measures creating and saving an empty resource.
#[derive(Debug, Default)]
pub struct ResourceCreationCase;

impl CaseLogic for ResourceCreationCase {
    fn name(&self) -> String {
        "ResourceCreation".to_string()
    }

    fn measure(&mut self, repository: &dyn ModelRepository, _: &BenchmarkModel) -> Result<()> {
        let resource = repository.create_resource()?;
        repository.save(&resource)?;
        Ok(())
    }
}
