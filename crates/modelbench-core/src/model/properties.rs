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

//! Workload shape descriptor.

use crate::error::{validate_model_depth, validate_model_size, BenchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest accepted free-memory percentage for memory sensitive generation.
pub const MIN_MEM_USAGE_PERCENT: u8 = 5;

/// Highest accepted free-memory percentage for memory sensitive generation.
pub const MAX_MEM_USAGE_PERCENT: u8 = 100;

/// Shape of a synthetic benchmark model.
///
/// `count` is the exact number of nodes to generate, `depth` the maximum
/// number of levels and `width` the maximum number of children per node.
/// A properties value is feasible iff `count <= Σ_{i<depth} width^i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ModelProperties {
    count: usize,
    depth: usize,
    width: usize,
    value_size: usize,
    mem_usage_percent: Option<u8>,
}

impl ModelProperties {
    /// Marker for properties that generate an exact node count.
    pub const NOT_MEMORY_SENSITIVE: Option<u8> = None;

    /// Creates properties for an exact-count model.
    ///
    /// Only the hard size limits are checked here; feasibility is checked
    /// by [`ModelProperties::validate`] and by the generator.
    pub fn new(count: usize, depth: usize, width: usize, value_size: usize) -> Result<Self> {
        validate_model_size(count)?;
        validate_model_depth(depth)?;
        Ok(Self {
            count,
            depth,
            width,
            value_size,
            mem_usage_percent: Self::NOT_MEMORY_SENSITIVE,
        })
    }

    /// Makes these properties memory sensitive.
    ///
    /// Generation then ignores `count` and grows the tree until the free
    /// memory ratio falls to `percent`.
    pub fn with_mem_usage(mut self, percent: u8) -> Result<Self> {
        if !(MIN_MEM_USAGE_PERCENT..=MAX_MEM_USAGE_PERCENT).contains(&percent) {
            return Err(BenchError::invalid_config(
                "mem_usage_percent",
                format!(
                    "must be between {} and {}, got {}",
                    MIN_MEM_USAGE_PERCENT, MAX_MEM_USAGE_PERCENT, percent
                ),
            ));
        }
        self.mem_usage_percent = Some(percent);
        Ok(self)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn value_size(&self) -> usize {
        self.value_size
    }

    pub fn mem_usage_percent(&self) -> Option<u8> {
        self.mem_usage_percent
    }

    pub fn is_memory_sensitive(&self) -> bool {
        self.mem_usage_percent.is_some()
    }

    /// Maximum number of nodes a tree of this depth and width can hold.
    ///
    /// Saturates instead of overflowing for very wide or deep shapes.
    pub fn max_tree_size(&self) -> u128 {
        max_tree_size(self.depth, self.width)
    }

    /// Returns true if `count` nodes fit into the shape.
    pub fn is_feasible(&self) -> bool {
        self.count as u128 <= self.max_tree_size()
    }

    /// Rejects infeasible properties.
    pub fn validate(&self) -> Result<()> {
        if self.is_memory_sensitive() || self.is_feasible() {
            Ok(())
        } else {
            Err(BenchError::InfeasibleModel {
                count: self.count,
                max: self.max_tree_size(),
            })
        }
    }

    /// Returns a copy with a different node count.
    pub(crate) fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// `Σ_{i=0}^{depth-1} width^i`, saturating at `u128::MAX`.
pub fn max_tree_size(depth: usize, width: usize) -> u128 {
    let mut total: u128 = 0;
    let mut level: u128 = 1;
    for _ in 0..depth {
        total = total.saturating_add(level);
        if width == 1 {
            continue;
        }
        level = level.saturating_mul(width as u128);
        if level == 0 {
            // width 0: only the root level exists
            break;
        }
    }
    total
}

impl fmt::Display for ModelProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "count={} depth={} width={} valueSize={}",
            self.count, self.depth, self.width, self.value_size
        )?;
        if let Some(percent) = self.mem_usage_percent {
            write!(f, " memUsage={}%", percent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_tree_size() {
        assert_eq!(max_tree_size(0, 10), 0);
        assert_eq!(max_tree_size(1, 10), 1);
        assert_eq!(max_tree_size(3, 10), 111);
        assert_eq!(max_tree_size(5, 1), 5);
        assert_eq!(max_tree_size(4, 0), 1);
        assert_eq!(max_tree_size(4096, 700), u128::MAX);
    }

    #[test]
    fn test_feasibility_boundary() {
        let ok = ModelProperties::new(111, 3, 10, 0).unwrap();
        assert!(ok.is_feasible());
        assert!(ok.validate().is_ok());

        let too_many = ModelProperties::new(112, 3, 10, 0).unwrap();
        assert!(!too_many.is_feasible());
        assert_eq!(
            too_many.validate().unwrap_err(),
            BenchError::InfeasibleModel { count: 112, max: 111 }
        );
    }

    #[test]
    fn test_mem_usage_range() {
        let props = ModelProperties::new(0, 10, 10, 0).unwrap();
        assert!(!props.is_memory_sensitive());
        assert!(props.with_mem_usage(4).is_err());
        assert!(props.with_mem_usage(101).is_err());

        let sensitive = props.with_mem_usage(5).unwrap();
        assert_eq!(sensitive.mem_usage_percent(), Some(5));
        assert!(props.with_mem_usage(100).is_ok());
    }

    #[test]
    fn test_size_limits() {
        assert!(ModelProperties::new(crate::error::MAX_MODEL_SIZE + 1, 3, 10, 0).is_err());
        assert!(ModelProperties::new(1, crate::error::MAX_MODEL_DEPTH + 1, 10, 0).is_err());
    }

    #[test]
    fn test_display() {
        let props = ModelProperties::new(10, 2, 3, 4).unwrap();
        assert_eq!(props.to_string(), "count=10 depth=2 width=3 valueSize=4");
    }
}
