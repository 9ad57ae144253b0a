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

//! Case workflow tests.
//!
//! Verifies hook order, guaranteed teardown and failure capture of a single
//! trial, observed through a recording repository.

mod common;

use common::{Behavior, CallLog, FixedProbe, RecordingRepository, ScriptedCase};
use modelbench_core::{BenchError, BenchmarkCase, BenchmarkData, ModelRepository, RepositoryStatus};
use std::sync::Arc;
use std::time::Duration;

fn case(name: &str, behavior: Behavior, log: &CallLog) -> BenchmarkCase {
    let mut case = BenchmarkCase::new(ScriptedCase::new(name, behavior, log.clone()));
    case.configure_meter(Duration::from_millis(10), Arc::new(FixedProbe));
    case
}

#[test]
fn test_successful_trial_runs_hooks_in_order() {
    let log = CallLog::default();
    let repo = Arc::new(RecordingRepository::new("REC", log.clone()));
    let mut case = case("Probe", Behavior::Succeed, &log);

    let result = case
        .execute_benchmark(&BenchmarkData::new(repo.clone()))
        .unwrap();

    assert!(!result.is_failed());
    assert_eq!(result.case_name(), "Probe");
    assert_eq!(result.repository_name(), "REC");
    assert!(!result.snapshots().is_empty());
    assert_eq!(result.avg_used_memory(), 10);
    assert_eq!(result.max_available_memory(), 100);

    assert_eq!(
        log.entries(),
        vec![
            "Probe@REC:set_up",
            "REC:open",
            "REC:save",
            "Probe@REC:measure",
            "Probe@REC:tear_down",
            "REC:close",
            "REC:clean",
            "REC:wipe",
        ]
    );
    assert_eq!(repo.status(), RepositoryStatus::Stopped);
    assert_eq!(case.last_repository(), Some("REC"));
}

#[test]
fn test_failing_measure_still_tears_down_once() {
    let log = CallLog::default();
    let repo = Arc::new(RecordingRepository::new("REC", log.clone()));
    let mut case = case("Broken", Behavior::Fail, &log);

    let result = case.execute_benchmark(&BenchmarkData::new(repo)).unwrap();

    assert!(result.is_failed());
    assert_eq!(log.count("Broken@REC:measure"), 1);
    assert_eq!(log.count("Broken@REC:tear_down"), 1);
    assert!(matches!(case.last_error(), Some(BenchError::CaseFailed { .. })));
}

#[test]
fn test_panicking_measure_is_captured() {
    let log = CallLog::default();
    let repo = Arc::new(RecordingRepository::new("REC", log.clone()));
    let mut case = case("Explodes", Behavior::Panic, &log);

    let result = case.execute_benchmark(&BenchmarkData::new(repo)).unwrap();

    assert!(result.is_failed());
    assert_eq!(log.count("Explodes@REC:tear_down"), 1);
    match case.last_error() {
        Some(BenchError::CasePanicked { case, message }) => {
            assert_eq!(case, "Explodes");
            assert_eq!(message, "measure panicked");
        }
        other => panic!("expected a captured panic, got {:?}", other),
    }
}

#[test]
fn test_failing_set_up_skips_measure() {
    let log = CallLog::default();
    let repo = Arc::new(RecordingRepository::new("REC", log.clone()));
    let mut case = case("NoSetUp", Behavior::FailSetUp, &log);

    let result = case.execute_benchmark(&BenchmarkData::new(repo)).unwrap();

    assert!(result.is_failed());
    assert_eq!(log.count("NoSetUp@REC:measure"), 0);
    assert_eq!(log.count("NoSetUp@REC:tear_down"), 1);
    assert_eq!(result.real_time(), Duration::ZERO);
}

#[test]
fn test_repository_error_marks_trial_failed() {
    let log = CallLog::default();
    let repo = Arc::new(RecordingRepository::new("REC", log.clone()).failing_start());
    let mut case = case("Probe", Behavior::Succeed, &log);

    let result = case.execute_benchmark(&BenchmarkData::new(repo.clone())).unwrap();

    assert!(result.is_failed());
    assert_eq!(log.count("Probe@REC:tear_down"), 1);
}

#[test]
fn test_reset_clears_per_trial_state() {
    let log = CallLog::default();
    let repo = Arc::new(RecordingRepository::new("REC", log.clone()));
    let mut case = case("Probe", Behavior::Succeed, &log);

    case.execute_benchmark(&BenchmarkData::new(repo)).unwrap();
    assert!(case.has_cached_model());

    case.reset();
    assert!(!case.has_cached_model());
    assert_eq!(case.last_repository(), None);
}
