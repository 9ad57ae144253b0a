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

//! Performance cases.
//!
//! - `setup`: repository startup and empty resource creation
//! - `save`: saving random models of two sizes
//! - `load`: loading a persisted sample
//! - `traversal`: visiting every node of a loaded sample

pub mod load;
pub mod save;
pub mod setup;
pub mod traversal;

pub use load::ResourceLoadCase;
pub use save::{ModelSaveCase, BIG_MODEL_COUNT, MINIMAL_MODEL_COUNT};
pub use setup::{RepositorySetupCase, ResourceCreationCase};
pub use traversal::ModelTraversalCase;
