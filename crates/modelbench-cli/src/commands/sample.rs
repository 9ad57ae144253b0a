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

//! Sample model generation.

use crate::error::CliError;
use modelbench_core::SampleModel;
use std::path::Path;

/// Writes the requested samples, or all of them, into `dir`.
pub fn generate_sample(dir: &Path, sizes: &[String]) -> Result<(), CliError> {
    let samples = if sizes.is_empty() {
        SampleModel::ALL.to_vec()
    } else {
        sizes
            .iter()
            .map(|size| size.parse::<SampleModel>())
            .collect::<Result<Vec<_>, _>>()?
    };

    for sample in samples {
        let path = sample.write_to(dir)?;
        println!("{}", path.display());
    }
    Ok(())
}
