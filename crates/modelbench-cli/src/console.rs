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

//! Interactive control surface.
//!
//! Reads one command per line and drives a [`BenchmarkController`]:
//!
//! ```text
//! run <target|all> [iterations]   start a benchmark in the background
//! list                            list registered repositories
//! stop                            stop after the current trial
//! status                          show whether a benchmark is running
//! help                            show this help
//! exit                            stop any benchmark and leave
//! ```

use crate::controller::{BenchmarkController, RunOutcome, Target};
use crate::error::CliError;
use colored::Colorize;
use modelbench_core::DEFAULT_ITERATION_COUNT;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "modelbench> ";

const HELP: &str = "\
Commands:
  run <target|all> [iterations]  benchmark one repository or all available ones
  list                           list registered repositories
  stop                           stop the running benchmark after the current trial
  status                         show whether a benchmark is running
  help                           show this help
  exit                           stop any running benchmark and leave";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Run { target: Target, iterations: u32 },
    List,
    Stop,
    Status,
    Help,
    Exit,
    Empty,
}

/// Parses a console line. Command names ignore case.
pub fn parse_line(line: &str) -> Result<ConsoleCommand, CliError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(ConsoleCommand::Empty);
    };
    let parsed = match command.to_ascii_lowercase().as_str() {
        "run" => {
            let target = words
                .next()
                .ok_or_else(|| CliError::invalid_argument("target", "", "missing target"))?
                .parse::<Target>()?;
            let iterations = match words.next() {
                Some(value) => parse_iterations(value)?,
                None => DEFAULT_ITERATION_COUNT,
            };
            ConsoleCommand::Run { target, iterations }
        }
        "list" => ConsoleCommand::List,
        "stop" => ConsoleCommand::Stop,
        "status" => ConsoleCommand::Status,
        "help" | "?" => ConsoleCommand::Help,
        "exit" | "quit" => ConsoleCommand::Exit,
        other => return Err(CliError::UnknownCommand(other.to_string())),
    };
    if let Some(extra) = words.next() {
        return Err(CliError::invalid_argument(
            "command",
            extra,
            "unexpected argument",
        ));
    }
    Ok(parsed)
}

/// Parses a positive iteration count.
pub fn parse_iterations(value: &str) -> Result<u32, CliError> {
    match value.parse::<u32>() {
        Ok(0) => Err(CliError::invalid_argument(
            "iterations",
            value,
            "must be at least 1",
        )),
        Ok(n) => Ok(n),
        Err(e) => Err(CliError::invalid_argument("iterations", value, e.to_string())),
    }
}

/// Line-driven console over any reader and writer.
pub struct Console<'a> {
    controller: &'a BenchmarkController,
}

impl<'a> Console<'a> {
    pub fn new(controller: &'a BenchmarkController) -> Self {
        Self { controller }
    }

    /// Reads commands until `exit` or end of input.
    ///
    /// A benchmark still running at that point is stopped and awaited.
    pub fn run(&self, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        writeln!(output, "Model repository benchmark console. Type 'help' for commands.")?;
        let mut lines = input.lines();
        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;
            let Some(line) = lines.next() else {
                writeln!(output)?;
                break;
            };
            let line = line?;
            self.report_finished(&mut output)?;
            match parse_line(&line) {
                Ok(ConsoleCommand::Exit) => break,
                Ok(command) => self.dispatch(command, &mut output)?,
                Err(e) => writeln!(output, "{} {}", "Error:".red().bold(), e)?,
            }
        }

        if self.controller.is_running() {
            writeln!(output, "Stopping benchmark, waiting for the current trial to finish")?;
            let _ = self.controller.stop();
        }
        match self.controller.wait() {
            Ok(outcome) => print_outcome(&outcome, &mut output),
            Err(CliError::NotRunning) => Ok(()),
            Err(e) => writeln!(output, "{} {}", "Benchmark failed:".red().bold(), e),
        }
    }

    fn dispatch(&self, command: ConsoleCommand, output: &mut impl Write) -> io::Result<()> {
        match command {
            ConsoleCommand::Run { target, iterations } => {
                match self.controller.start(target.clone(), iterations) {
                    Ok(()) => writeln!(
                        output,
                        "Benchmark started for {} ({} iterations)",
                        target, iterations
                    ),
                    Err(e) => writeln!(output, "{} {}", "Error:".red().bold(), e),
                }
            }
            ConsoleCommand::List => {
                for repository in self.controller.manager().repositories().list() {
                    let availability = if repository.is_available() {
                        "available".green()
                    } else {
                        "unavailable".yellow()
                    };
                    writeln!(output, "{:<16} {}", repository.name(), availability)?;
                }
                Ok(())
            }
            ConsoleCommand::Stop => match self.controller.stop() {
                Ok(()) => writeln!(
                    output,
                    "Stopping benchmark, please wait for the current trial to finish"
                ),
                Err(e) => writeln!(output, "{} {}", "Error:".red().bold(), e),
            },
            ConsoleCommand::Status => {
                if self.controller.is_running() {
                    writeln!(output, "Benchmark running")
                } else {
                    writeln!(output, "Idle")
                }
            }
            ConsoleCommand::Help => writeln!(output, "{}", HELP),
            ConsoleCommand::Empty | ConsoleCommand::Exit => Ok(()),
        }
    }

    fn report_finished(&self, output: &mut impl Write) -> io::Result<()> {
        match self.controller.take_finished() {
            Some(Ok(outcome)) => print_outcome(&outcome, output),
            Some(Err(e)) => writeln!(output, "{} {}", "Benchmark failed:".red().bold(), e),
            None => Ok(()),
        }
    }
}

/// One-line summary of a finished batch.
pub fn print_outcome(outcome: &RunOutcome, output: &mut impl Write) -> io::Result<()> {
    let results = &outcome.results;
    let state = if results.stopped { "stopped" } else { "finished" };
    writeln!(
        output,
        "Benchmark {}: {}/{} combinations, {} trials, {} failed",
        state,
        results.completed,
        results.total,
        results.trial_count(),
        results.failure_count()
    )?;
    if let Some(path) = &outcome.report {
        writeln!(output, "Results written to {}", path.display())?;
    }
    Ok(())
}
