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

//! Random model tree generation.
//!
//! Trees are grown one node at a time: each new node is attached to a
//! uniformly chosen parent that still has depth and width room left. The
//! shape is checked for feasibility before the first node is created, so an
//! impossible request never starts a partial generation loop.

use crate::error::{BenchError, Result, MAX_MODEL_DEPTH, MAX_MODEL_SIZE};
use crate::measurement::{MemoryProbe, SystemMemoryProbe};
use crate::model::{BenchmarkModel, ModelProperties, Node};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::Arc;
use tracing::{debug, trace};

/// Default lower bound for random properties.
pub const DEFAULT_LOWER_BOUND: usize = 1;

/// Default upper bound (exclusive) for random properties.
pub const DEFAULT_UPPER_BOUND: usize = 20_000;

/// Longest string or byte array put into a single node.
pub const MAX_VALUE_SIZE: usize = 4_000;

/// Memory is probed once per this many generated nodes.
const MEMORY_PROBE_STRIDE: usize = 256;

/// Attempts made by [`ModelGenerator::generate_random_properties`].
const RANDOM_PROPERTIES_ATTEMPTS: usize = 10;

const RANDOM_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Properties of the single-node model used to warm up repositories.
pub fn warm_up_properties() -> ModelProperties {
    // 1x1x1 is always within limits
    ModelProperties::new(1, 1, 1, 1).unwrap_or_default()
}

/// Seedable model generator.
pub struct ModelGenerator {
    rng: StdRng,
    probe: Option<Arc<dyn MemoryProbe>>,
}

impl Default for ModelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelGenerator {
    /// Generator seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            probe: None,
        }
    }

    /// Deterministic generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            probe: None,
        }
    }

    /// Uses `probe` for memory sensitive generation instead of the system probe.
    pub fn with_probe(mut self, probe: Arc<dyn MemoryProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Generates a model with the given shape.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InfeasibleModel`] when `count` nodes cannot fit
    /// into `depth` levels of at most `width` children.
    pub fn generate(&mut self, props: &ModelProperties) -> Result<BenchmarkModel> {
        props.validate()?;

        let target = match props.mem_usage_percent() {
            Some(_) => props.max_tree_size().min(MAX_MODEL_SIZE as u128) as usize,
            None => props.count(),
        };
        if target == 0 || props.depth() == 0 {
            return Ok(BenchmarkModel::void());
        }

        trace!("Starting generating model with properties {}", props);
        let shape = self.grow(props, target);
        let model = self.assemble(&shape, props.value_size());
        trace!("Finished creating {} elements", shape.parents.len());
        Ok(model)
    }

    /// Chooses the parent of every node; index 0 is the root.
    fn grow(&mut self, props: &ModelProperties, target: usize) -> Shape {
        let depth = props.depth();
        let width = props.width();
        let mut shape = Shape::with_capacity(target);
        shape.push(usize::MAX, 1);

        // nodes that may still receive children
        let mut open: Vec<usize> = Vec::new();
        if depth > 1 && width > 0 {
            open.push(0);
        }

        let memory = props.mem_usage_percent().map(|percent| {
            let probe = self
                .probe
                .clone()
                .unwrap_or_else(|| Arc::new(SystemMemoryProbe::new()));
            let initial = probe.snapshot().free_mb.max(1);
            (probe, initial, u64::from(percent))
        });

        while shape.len() < target && !open.is_empty() {
            if let Some((probe, initial, percent)) = &memory {
                if shape.len() % MEMORY_PROBE_STRIDE == 0 {
                    let free = probe.snapshot().free_mb;
                    let ratio = free * 100 / initial;
                    debug!("Initial: {} current: {} -> {}%", initial, free, ratio);
                    if ratio <= *percent {
                        break;
                    }
                }
            }

            let slot = self.rng.gen_range(0..open.len());
            let parent = open[slot];
            let level = shape.levels[parent] + 1;
            let index = shape.push(parent, level);

            shape.children[parent] += 1;
            if shape.children[parent] >= width {
                open.swap_remove(slot);
            }
            if level < depth {
                open.push(index);
            }
        }
        shape
    }

    /// Builds the nested tree bottom-up from the parent table.
    fn assemble(&mut self, shape: &Shape, value_size: usize) -> BenchmarkModel {
        let mut nodes: Vec<Node> = (0..shape.len()).map(|_| self.node(value_size)).collect();

        // Children always have larger indices than their parent, so popping
        // from the back only ever moves completed subtrees.
        while nodes.len() > 1 {
            let Some(mut node) = nodes.pop() else {
                break;
            };
            node.children.reverse();
            let parent = shape.parents[nodes.len()];
            nodes[parent].children.push(node);
        }

        match nodes.pop() {
            Some(mut root) => {
                root.children.reverse();
                BenchmarkModel::new(root)
            }
            None => BenchmarkModel::void(),
        }
    }

    fn node(&mut self, value_size: usize) -> Node {
        let mut node = Node::new();
        if value_size > 0 {
            let len = value_size.min(MAX_VALUE_SIZE);
            node.name = Some(self.random_string(len));
            node.value = Some(self.rng.gen());
            let mut data = vec![0u8; len];
            self.rng.fill_bytes(&mut data);
            node.data = Some(data);
        }
        node
    }

    fn random_string(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| RANDOM_CHARS[self.rng.gen_range(0..RANDOM_CHARS.len())] as char)
            .collect()
    }

    /// Random value in `[lower, upper)`, or `lower` when the range is empty.
    fn random_in(&mut self, lower: usize, upper: usize) -> usize {
        if upper <= lower {
            lower
        } else {
            self.rng.gen_range(lower..upper)
        }
    }

    /// Random count, depth, width and value size drawn from `[lower, upper)`.
    ///
    /// Draws are retried a few times until the shape is feasible; if it
    /// never is, the count is clamped to the maximum tree size.
    pub fn generate_random_properties(
        &mut self,
        lower: usize,
        upper: usize,
    ) -> Result<ModelProperties> {
        if lower > upper {
            return Err(BenchError::invalid_config(
                "upper",
                format!("upper bound {} is below lower bound {}", upper, lower),
            ));
        }

        let mut props = ModelProperties::default();
        for _ in 0..RANDOM_PROPERTIES_ATTEMPTS {
            let value_size = self.random_in(lower, upper);
            let count = self.random_in(lower, upper).min(MAX_MODEL_SIZE);
            let depth = self.random_in(lower, upper).min(MAX_MODEL_DEPTH);
            let width = self.random_in(lower, upper);
            props = ModelProperties::new(count, depth, width, value_size)?;
            if props.is_feasible() {
                return Ok(props);
            }
        }

        let max = props.max_tree_size().min(props.count() as u128) as usize;
        Ok(props.with_count(max))
    }

    /// Random properties using the default bounds.
    pub fn random_properties(&mut self) -> Result<ModelProperties> {
        self.generate_random_properties(DEFAULT_LOWER_BOUND, DEFAULT_UPPER_BOUND)
    }
}

/// Parent table of a tree under construction.
struct Shape {
    parents: Vec<usize>,
    levels: Vec<usize>,
    children: Vec<usize>,
}

impl Shape {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            parents: Vec::with_capacity(capacity),
            levels: Vec::with_capacity(capacity),
            children: Vec::with_capacity(capacity),
        }
    }

    fn len(&self) -> usize {
        self.parents.len()
    }

    fn push(&mut self, parent: usize, level: usize) -> usize {
        self.parents.push(parent);
        self.levels.push(level);
        self.children.push(0);
        self.parents.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::HeapSnapshot;
    use crate::model::max_tree_size;
    use chrono::Utc;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_feasibility_boundary() {
        let mut generator = ModelGenerator::with_seed(7);

        let ok = ModelProperties::new(111, 3, 10, 0).unwrap();
        let model = generator.generate(&ok).unwrap();
        assert_eq!(model.size(), 111);

        let too_many = ModelProperties::new(112, 3, 10, 0).unwrap();
        assert_eq!(
            generator.generate(&too_many).unwrap_err(),
            BenchError::InfeasibleModel { count: 112, max: 111 }
        );
    }

    #[test]
    fn test_exact_count_and_bounds() {
        let mut generator = ModelGenerator::with_seed(42);
        let props = ModelProperties::new(1000, 20, 100, 0).unwrap();
        let model = generator.generate(&props).unwrap();
        let root = model.root().unwrap();
        assert_eq!(root.size(), 1000);
        assert!(root.depth() <= 20);
        assert!(root.max_width() <= 100);
    }

    #[test]
    fn test_full_tree() {
        let mut generator = ModelGenerator::with_seed(1);
        let props = ModelProperties::new(15, 4, 2, 0).unwrap();
        let root = generator.generate(&props).unwrap().into_root().unwrap();
        assert_eq!(root.size(), 15);
        assert_eq!(root.depth(), 4);
        assert_eq!(root.max_width(), 2);
    }

    #[test]
    fn test_void_and_single() {
        let mut generator = ModelGenerator::with_seed(3);
        let void = ModelProperties::new(0, 10, 10, 0).unwrap();
        assert!(generator.generate(&void).unwrap().is_void());

        let single = generator.generate(&warm_up_properties()).unwrap();
        assert_eq!(single.size(), 1);
    }

    #[test]
    fn test_values() {
        let mut generator = ModelGenerator::with_seed(9);

        let props = ModelProperties::new(5, 3, 3, 16).unwrap();
        let model = generator.generate(&props).unwrap();
        for node in model.nodes() {
            let name = node.name.as_ref().unwrap();
            assert_eq!(name.len(), 16);
            assert!(name.bytes().all(|b| b.is_ascii_lowercase()));
            assert_eq!(node.data.as_ref().unwrap().len(), 16);
            assert!(node.value.is_some());
        }

        let props = ModelProperties::new(5, 3, 3, 0).unwrap();
        let model = generator.generate(&props).unwrap();
        assert!(model
            .nodes()
            .all(|n| n.name.is_none() && n.value.is_none() && n.data.is_none()));
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let props = ModelProperties::new(200, 6, 5, 4).unwrap();
        let a = ModelGenerator::with_seed(11).generate(&props).unwrap();
        let b = ModelGenerator::with_seed(11).generate(&props).unwrap();
        assert_eq!(a, b);
    }

    /// Free memory shrinks by 1 MB per probe.
    struct DrainingProbe {
        free: AtomicU64,
    }

    impl MemoryProbe for DrainingProbe {
        fn snapshot(&self) -> HeapSnapshot {
            let free = self.free.fetch_sub(1, Ordering::SeqCst);
            HeapSnapshot {
                timestamp: Utc::now(),
                used_mb: 0,
                free_mb: free,
                total_available_mb: free,
                max_available_mb: 100,
            }
        }

        fn max_available_mb(&self) -> u64 {
            100
        }
    }

    #[test]
    fn test_memory_sensitive_generation_stops_at_ratio() {
        let probe = Arc::new(DrainingProbe {
            free: AtomicU64::new(100),
        });
        let props = ModelProperties::new(0, 10, 10, 0)
            .unwrap()
            .with_mem_usage(95)
            .unwrap();
        let model = ModelGenerator::with_seed(5)
            .with_probe(probe)
            .generate(&props)
            .unwrap();

        // initial 100, then 99, 98, ... ; stops once 95% is reached
        let size = model.size();
        assert!(size > 0);
        assert!(size <= 6 * MEMORY_PROBE_STRIDE);
        assert_eq!(size % MEMORY_PROBE_STRIDE, 0);
    }

    #[test]
    fn test_random_properties() {
        let mut generator = ModelGenerator::with_seed(21);
        for _ in 0..50 {
            let props = generator.generate_random_properties(1, 10).unwrap();
            assert!(props.is_feasible());
            assert!((1..10).contains(&props.depth()));
            assert!((1..10).contains(&props.width()));
            assert!(props.count() < 10);
        }

        let fixed = generator.generate_random_properties(4, 4).unwrap();
        assert_eq!(fixed.depth(), 4);
        assert_eq!(fixed.width(), 4);

        assert!(generator.generate_random_properties(5, 1).is_err());
    }

    proptest! {
        #[test]
        fn prop_generated_tree_respects_shape(
            depth in 1usize..8,
            width in 1usize..6,
            fill in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let max = max_tree_size(depth, width).min(2_000) as usize;
            let count = ((max as f64 * fill) as usize).max(1);
            let props = ModelProperties::new(count, depth, width, 0).unwrap();
            let model = ModelGenerator::with_seed(seed).generate(&props).unwrap();
            let root = model.root().unwrap();
            prop_assert_eq!(root.size(), count);
            prop_assert!(root.depth() <= depth);
            prop_assert!(root.max_width() <= width);
        }
    }

    #[test]
    fn test_random_properties_single_value_range() {
        let mut generator = ModelGenerator::with_seed(0);
        let props = generator.generate_random_properties(1, 2).unwrap();
        assert!(props.is_feasible());
        assert_eq!(props.count(), 1);
    }
}
