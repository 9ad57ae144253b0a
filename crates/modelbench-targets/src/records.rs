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

//! Flat node records.
//!
//! Persisting backends store a forest as a pre-order list of records, each
//! pointing at its parent by index. Unlike nested JSON this has no depth
//! limit on either side.

use modelbench_core::{Node, RepositoryError};
use serde::{Deserialize, Serialize};

/// One node without its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Index of the parent record; `None` for a root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<u8>>,
}

/// Flattens `roots` into pre-order records.
pub fn flatten(roots: &[Node]) -> Vec<NodeRecord> {
    let mut records = Vec::with_capacity(roots.iter().map(Node::size).sum());
    let mut stack: Vec<(&Node, Option<usize>)> = roots.iter().rev().map(|r| (r, None)).collect();
    while let Some((node, parent)) = stack.pop() {
        let index = records.len();
        records.push(NodeRecord {
            parent,
            name: node.name.clone(),
            value: node.value,
            data: node.data.clone(),
        });
        stack.extend(node.children.iter().rev().map(|c| (c, Some(index))));
    }
    records
}

/// Rebuilds the forest written by [`flatten`].
///
/// Every parent index must be smaller than the index of its child.
pub fn rebuild(records: Vec<NodeRecord>) -> Result<Vec<Node>, RepositoryError> {
    let mut parents = Vec::with_capacity(records.len());
    let mut nodes = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        if let Some(parent) = record.parent {
            if parent >= index {
                return Err(RepositoryError::Serialization(format!(
                    "record {} points at parent {}",
                    index, parent
                )));
            }
        }
        parents.push(record.parent);
        let mut node = Node::new();
        node.name = record.name;
        node.value = record.value;
        node.data = record.data;
        nodes.push(node);
    }

    let mut roots = Vec::new();
    while let Some(mut node) = nodes.pop() {
        node.children.reverse();
        match parents[nodes.len()] {
            Some(parent) => nodes[parent].children.push(node),
            None => roots.push(node),
        }
    }
    roots.reverse();
    Ok(roots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: i32) -> Node {
        let mut node = Node::new();
        node.value = Some(value);
        node
    }

    fn sample_forest() -> Vec<Node> {
        let mut first = leaf(1);
        let mut middle = leaf(2);
        middle.children.push(leaf(3));
        first.children.push(middle);
        first.children.push(leaf(4));
        vec![first, leaf(5)]
    }

    #[test]
    fn test_flatten_is_pre_order() {
        let records = flatten(&sample_forest());
        let values: Vec<_> = records.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
        let parents: Vec<_> = records.iter().map(|r| r.parent).collect();
        assert_eq!(parents, vec![None, Some(0), Some(1), Some(0), None]);
    }

    #[test]
    fn test_rebuild_restores_forest() {
        let forest = sample_forest();
        assert_eq!(rebuild(flatten(&forest)).unwrap(), forest);
        assert!(rebuild(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_rebuild_rejects_forward_parent() {
        let records = vec![NodeRecord {
            parent: Some(0),
            name: None,
            value: None,
            data: None,
        }];
        assert!(matches!(
            rebuild(records),
            Err(RepositoryError::Serialization(_))
        ));
    }

    #[test]
    fn test_deep_chain() {
        let mut root = leaf(0);
        for i in 1..5_000 {
            let mut parent = leaf(i);
            parent.children.push(root);
            root = parent;
        }
        let forest = vec![root];
        let rebuilt = rebuild(flatten(&forest)).unwrap();
        assert_eq!(rebuilt.len(), 1);
        assert_eq!(rebuilt[0].depth(), 5_000);
        assert_eq!(rebuilt[0].value, Some(4_999));
    }
}
