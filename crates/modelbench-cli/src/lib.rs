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

//! Dweve ModelBench CLI library.
//!
//! Command parsing and execution for the `modelbench` binary.
//!
//! # Commands
//!
//! - **run**: benchmark one repository, or every available one with `all`
//! - **list**: list registered repositories
//! - **console**: interactive console (`run`, `list`, `stop`, `status`, `help`, `exit`)
//! - **generate-sample**: write the sample models as JSON files
//!
//! # Examples
//!
//! ```no_run
//! use modelbench_cli::console::parse_line;
//!
//! let command = parse_line("run MEM 3").unwrap();
//! println!("{:?}", command);
//! ```

pub mod cli;
pub mod commands;
pub mod console;
pub mod controller;
pub mod error;
pub mod logging;

pub use controller::{BenchmarkController, RunOutcome, Target};
pub use error::CliError;
