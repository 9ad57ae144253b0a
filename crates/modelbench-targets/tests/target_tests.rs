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

//! Behaviour shared by every backend: lifecycle, persistence and cleaning.

use modelbench_core::{
    BenchmarkModel, EventLevel, ModelGenerator, ModelProperties, ModelRepository, RepositoryError,
    RepositoryListener, RepositoryStatus, SampleModel,
};
use modelbench_targets::{default_repositories, FileRepository, MemoryRepository};
use parking_lot::Mutex;
use std::error::Error;
use std::sync::Arc;

#[derive(Default)]
struct StatusLog(Mutex<Vec<(RepositoryStatus, RepositoryStatus)>>);

impl RepositoryListener for StatusLog {
    fn status_changed(&self, _: &str, old: RepositoryStatus, new: RepositoryStatus) {
        self.0.lock().push((old, new));
    }

    fn repository_event(
        &self,
        _: &str,
        _: EventLevel,
        _: &str,
        _: Option<&(dyn Error + 'static)>,
    ) {
    }
}

fn model(seed: u64) -> BenchmarkModel {
    let props = ModelProperties::new(200, 6, 8, 16).unwrap();
    ModelGenerator::with_seed(seed).generate(&props).unwrap()
}

fn exercise(repo: &dyn ModelRepository) {
    repo.clean();
    repo.start();
    assert_eq!(repo.status(), RepositoryStatus::Running);

    let model = model(11);
    let uri = repo.save_model(&model).unwrap();
    let resource = repo.load_resource(&uri).unwrap();
    assert_eq!(resource.uri(), uri);
    assert_eq!(resource.size(), 200);
    assert_eq!(resource.contents.first(), model.root());
    repo.unload_resource(resource).unwrap();

    repo.stop();
    assert_eq!(repo.status(), RepositoryStatus::Stopped);
    assert!(matches!(
        repo.load_resource(&uri),
        Err(RepositoryError::NotRunning(_))
    ));

    repo.start();
    assert_eq!(repo.load_node(&uri, 0).unwrap().size(), 200);
    assert!(repo.load_node(&uri, 1).is_err());

    repo.clean();
    assert_eq!(repo.status(), RepositoryStatus::Running);
    assert!(matches!(
        repo.load_resource(&uri),
        Err(RepositoryError::ResourceNotFound(_))
    ));
    repo.stop();
}

#[test]
fn test_memory_repository() {
    exercise(&MemoryRepository::new());
}

#[test]
fn test_file_repository() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileRepository::new(dir.path().join("docs"));
    exercise(&repo);
    assert_eq!(repo.document_count().unwrap(), 0);
}

#[test]
fn test_file_repository_writes_documents() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileRepository::new(dir.path());
    repo.start();
    repo.save_model(&model(1)).unwrap();
    repo.save_model(&model(2)).unwrap();
    assert_eq!(repo.document_count().unwrap(), 2);

    repo.restart();
    assert_eq!(repo.status(), RepositoryStatus::Running);
    assert_eq!(repo.document_count().unwrap(), 2);
}

#[test]
fn test_file_clean_is_offline() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileRepository::new(dir.path());
    let log = Arc::new(StatusLog::default());
    repo.add_listener(log.clone());
    repo.start();
    repo.clean();

    use RepositoryStatus::*;
    assert_eq!(
        *log.0.lock(),
        vec![
            (Stopped, Starting),
            (Starting, Running),
            (Running, Stopping),
            (Stopping, Stopped),
            (Stopped, Cleaning),
            (Cleaning, Running),
        ]
    );
}

#[test]
fn test_memory_clean_is_online() {
    let repo = MemoryRepository::new();
    let log = Arc::new(StatusLog::default());
    repo.add_listener(log.clone());
    repo.start();
    repo.clean();

    use RepositoryStatus::*;
    assert_eq!(
        *log.0.lock(),
        vec![
            (Stopped, Starting),
            (Starting, Running),
            (Running, Cleaning),
            (Cleaning, Running),
        ]
    );
}

#[test]
fn test_file_repository_handles_deep_models() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileRepository::new(dir.path());
    repo.start();
    let props = ModelProperties::new(1_000, 1_000, 1, 0).unwrap();
    let model = ModelGenerator::with_seed(5).generate(&props).unwrap();
    let uri = repo.save_model(&model).unwrap();
    repo.restart();
    let node = repo.load_node(&uri, 0).unwrap();
    assert_eq!(node.depth(), 1_000);
}

#[test]
fn test_sample_model_round_trip() {
    let repo = MemoryRepository::new();
    repo.start();
    let sample = SampleModel::Size100.generate().unwrap();
    let uri = repo.save_model(&sample).unwrap();
    assert_eq!(repo.load_resource(&uri).unwrap().size(), 100);
}

#[test]
fn test_default_repositories() {
    let dir = tempfile::tempdir().unwrap();
    let repositories = default_repositories(Some(dir.path())).unwrap();
    let names: Vec<_> = repositories.iter().map(|r| r.name().to_string()).collect();
    assert_eq!(names[0], "MEM");
    assert_eq!(names[1], "FILE-JSON");
    assert!(repositories.iter().all(|r| r.is_available()));
}
