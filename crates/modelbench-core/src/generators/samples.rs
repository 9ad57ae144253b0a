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

//! Fixed pool of sample models.
//!
//! Samples have a fixed shape and are generated from a fixed seed, so every
//! run sees the same trees. When a sample directory is configured they are
//! read from `model_<label>_elements_0.json` instead.

use super::tree::ModelGenerator;
use crate::error::{BenchError, Result};
use crate::model::{BenchmarkModel, ModelProperties};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

const SAMPLE_SEED: u64 = 0x6d6f_64656c;

/// Sample models ordered by size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SampleModel {
    Size1,
    Size10,
    Size100,
    Size1K,
    Size10K,
    Size100K,
}

impl SampleModel {
    /// Every sample, smallest first.
    pub const ALL: [SampleModel; 6] = [
        SampleModel::Size1,
        SampleModel::Size10,
        SampleModel::Size100,
        SampleModel::Size1K,
        SampleModel::Size10K,
        SampleModel::Size100K,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SampleModel::Size1 => "1",
            SampleModel::Size10 => "10",
            SampleModel::Size100 => "100",
            SampleModel::Size1K => "1k",
            SampleModel::Size10K => "10k",
            SampleModel::Size100K => "100k",
        }
    }

    /// Shape as (count, width, depth).
    pub fn shape(&self) -> (usize, usize, usize) {
        match self {
            SampleModel::Size1 => (1, 10, 10),
            SampleModel::Size10 => (10, 10, 10),
            SampleModel::Size100 => (100, 10, 10),
            SampleModel::Size1K => (1_000, 100, 20),
            SampleModel::Size10K => (10_000, 300, 30),
            SampleModel::Size100K => (100_000, 700, 40),
        }
    }

    pub fn properties(&self) -> Result<ModelProperties> {
        let (count, width, depth) = self.shape();
        ModelProperties::new(count, depth, width, 0)
    }

    pub fn file_name(&self) -> String {
        format!("model_{}_elements_0.json", self.label())
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }

    /// Generates the sample from the fixed seed.
    pub fn generate(&self) -> Result<BenchmarkModel> {
        let seed = SAMPLE_SEED ^ self.shape().0 as u64;
        ModelGenerator::with_seed(seed).generate(&self.properties()?)
    }

    /// Loads the sample from `dir` if given, generating it otherwise.
    pub fn load(&self, dir: Option<&Path>) -> Result<BenchmarkModel> {
        match dir {
            Some(dir) => {
                let path = self.path_in(dir);
                debug!("Loading sample model from {}", path.display());
                BenchmarkModel::load_json(&path)
            }
            None => self.generate(),
        }
    }

    /// Generates the sample and writes it into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = self.path_in(dir);
        self.generate()?.save_json(&path)?;
        info!("Generated a {} element model and saved it to {}", self.label(), path.display());
        Ok(path)
    }
}

impl fmt::Display for SampleModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SampleModel {
    type Err = BenchError;

    /// Parses a label such as `10k`, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        SampleModel::ALL
            .into_iter()
            .find(|sample| sample.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                BenchError::invalid_config("sample", format!("unknown sample size '{}'", s))
            })
    }
}
