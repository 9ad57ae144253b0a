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

//! Log output of the binary.

use tracing_subscriber::EnvFilter;

/// Default directive when `RUST_LOG` does not say otherwise.
pub const DEFAULT_DIRECTIVE: &str = "modelbench=info";

/// Installs the stderr subscriber. `verbose` raises the default to debug.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let directive = if verbose {
        "modelbench=debug"
    } else {
        DEFAULT_DIRECTIVE
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
