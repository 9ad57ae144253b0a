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

//! Benchmark model representation.
//!
//! - `node`: the tree payload
//! - `properties`: shape descriptor and feasibility rules

pub mod node;
pub mod properties;

pub use node::{Node, NodeIter};
pub use properties::{max_tree_size, ModelProperties};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A generated or loaded model tree.
///
/// The void model (count 0) has no root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkModel {
    root: Option<Node>,
}

impl BenchmarkModel {
    pub fn new(root: Node) -> Self {
        Self { root: Some(root) }
    }

    /// The model without any node.
    pub fn void() -> Self {
        Self { root: None }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn into_root(self) -> Option<Node> {
        self.root
    }

    pub fn is_void(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes in the model.
    pub fn size(&self) -> usize {
        self.root.as_ref().map_or(0, Node::size)
    }

    /// Iterates all nodes in pre-order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.root.iter().flat_map(Node::iter)
    }

    /// Shape actually present in the tree.
    ///
    /// The void model reports all zeros.
    pub fn properties(&self, value_size: usize) -> Result<ModelProperties> {
        match &self.root {
            None => ModelProperties::new(0, 0, 0, value_size),
            Some(root) => {
                ModelProperties::new(root.size(), root.depth(), root.max_width(), value_size)
            }
        }
    }

    /// Reads a model written by [`BenchmarkModel::save_json`].
    pub fn load_json(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let model = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(model)
    }

    /// Writes the model as JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer(std::io::BufWriter::new(file), self)?;
        Ok(())
    }
}
