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

//! Storage unit of a repository.

use crate::model::Node;
use rand::Rng;

/// An addressable container of root nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    uri: String,
    /// Root nodes, in insertion order.
    pub contents: Vec<Node>,
}

impl Resource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            contents: Vec::new(),
        }
    }

    /// Creates an empty resource under a fresh random URI below `scheme`.
    pub fn with_random_uri(scheme: &str) -> Self {
        Self::new(format!("{}:/{}", scheme, random_id()))
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Total number of nodes held by the resource.
    pub fn size(&self) -> usize {
        self.contents.iter().map(Node::size).sum()
    }
}

/// 128 random bits as lowercase hex.
pub fn random_id() -> String {
    let bits: u128 = rand::thread_rng().gen();
    format!("{:032x}", bits)
}
