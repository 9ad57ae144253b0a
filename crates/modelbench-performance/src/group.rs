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

//! The performance benchmark group.

use crate::cases::{
    ModelSaveCase, ModelTraversalCase, RepositorySetupCase, ResourceCreationCase,
    ResourceLoadCase,
};
use modelbench_core::{BenchmarkCase, BenchmarkGroup};

/// Name the group registers under.
pub const GROUP_NAME: &str = "Performance";

/// Setup, creation, save, load and traversal cases, in that order.
///
/// The 100K traversal is left out unless enabled with
/// [`with_huge_traversal`](Self::with_huge_traversal).
#[derive(Debug, Clone, Default)]
pub struct PerformanceBenchmarkGroup {
    huge_traversal: bool,
}

impl PerformanceBenchmarkGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the 100K node traversal as the last case.
    pub fn with_huge_traversal(mut self) -> Self {
        self.huge_traversal = true;
        self
    }
}

impl BenchmarkGroup for PerformanceBenchmarkGroup {
    fn name(&self) -> &str {
        GROUP_NAME
    }

    fn cases(&self) -> Vec<BenchmarkCase> {
        let mut cases = vec![
            BenchmarkCase::new(RepositorySetupCase),
            BenchmarkCase::new(ResourceCreationCase),
            BenchmarkCase::new(ModelSaveCase::minimal()),
            BenchmarkCase::new(ResourceLoadCase::default()),
            BenchmarkCase::new(ModelTraversalCase::no_caching()),
            BenchmarkCase::new(ModelTraversalCase::caching()),
            BenchmarkCase::new(ModelSaveCase::big()),
            BenchmarkCase::new(ModelTraversalCase::big_no_caching()),
        ];
        if self.huge_traversal {
            cases.push(BenchmarkCase::new(ModelTraversalCase::huge_no_caching()));
        }
        cases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_order() {
        let names: Vec<_> = PerformanceBenchmarkGroup::new()
            .cases()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "RepositorySetup",
                "ResourceCreation",
                "MinimalModelSave",
                "ResourceLoad",
                "ModelTraversalNoCaching",
                "ModelTraversalCaching",
                "BigModelSave",
                "BigModelTraversalNoCaching",
            ]
        );
    }

    #[test]
    fn test_huge_traversal_opt_in() {
        let group = PerformanceBenchmarkGroup::new().with_huge_traversal();
        let cases = group.cases();
        assert_eq!(cases.len(), 9);
        assert_eq!(cases[8].name(), "HugeModelTraversalNoCaching");
        assert_eq!(group.name(), "Performance");
    }
}
