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

//! JSON document repository.
//!
//! Each resource is one JSON document in the work directory, named after the
//! random id in its URI. Nodes are stored as flat records.

use crate::records::{flatten, rebuild, NodeRecord};
use modelbench_core::{
    LifecycleHooks, ModelRepository, RepositoryError, RepositoryLifecycle, RepositoryListener,
    RepositoryResult, RepositoryStatus, Resource,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::{debug, trace};

/// Name the file repository registers under.
pub const FILE_REPOSITORY_NAME: &str = "FILE-JSON";

const URI_SCHEME: &str = "file";
const EXTENSION: &str = "json";

#[derive(Serialize, Deserialize)]
struct StoredResource {
    uri: String,
    records: Vec<NodeRecord>,
}

/// Repository persisting resources as JSON files.
pub struct FileRepository {
    lifecycle: RepositoryLifecycle,
    dir: PathBuf,
    // Keeps a temporary work directory alive.
    _temp: Option<TempDir>,
    cache: Mutex<HashMap<String, Resource>>,
}

impl FileRepository {
    /// Stores documents below `dir`, created on start.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            lifecycle: RepositoryLifecycle::new(FILE_REPOSITORY_NAME),
            dir: dir.into(),
            _temp: None,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Stores documents in a temporary directory removed on drop.
    pub fn temporary() -> RepositoryResult<Self> {
        let temp = tempfile::Builder::new().prefix("modelbench-").tempdir()?;
        let mut repo = Self::new(temp.path());
        repo._temp = Some(temp);
        Ok(repo)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of documents currently on disk.
    pub fn document_count(&self) -> RepositoryResult<usize> {
        Ok(self.documents()?.len())
    }

    fn documents(&self) -> RepositoryResult<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                paths.push(path);
            }
        }
        Ok(paths)
    }

    fn path_of(&self, uri: &str) -> RepositoryResult<PathBuf> {
        let id = uri
            .strip_prefix(URI_SCHEME)
            .and_then(|rest| rest.strip_prefix(":/"))
            .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| RepositoryError::ResourceNotFound(uri.to_string()))?;
        Ok(self.dir.join(format!("{}.{}", id, EXTENSION)))
    }

    fn ensure_running(&self) -> RepositoryResult<()> {
        match self.lifecycle.status() {
            RepositoryStatus::Running => Ok(()),
            _ => Err(RepositoryError::NotRunning(self.lifecycle.name().to_string())),
        }
    }
}

impl LifecycleHooks for FileRepository {
    fn open(&self) -> Result<(), RepositoryError> {
        fs::create_dir_all(&self.dir)?;
        debug!("[{}] using {}", self.lifecycle.name(), self.dir.display());
        Ok(())
    }

    fn release_cache(&self) {
        self.cache.lock().clear();
    }

    fn close(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn wipe(&self) -> Result<(), RepositoryError> {
        self.cache.lock().clear();
        for path in self.documents()? {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

impl ModelRepository for FileRepository {
    fn name(&self) -> &str {
        self.lifecycle.name()
    }

    fn uri(&self) -> String {
        format!("file://{}", self.dir.display())
    }

    fn status(&self) -> RepositoryStatus {
        self.lifecycle.status()
    }

    fn start(&self) {
        self.lifecycle.start(self)
    }

    fn stop(&self) {
        self.lifecycle.stop(self)
    }

    fn restart(&self) {
        self.lifecycle.restart(self)
    }

    fn clean(&self) {
        self.lifecycle.clean(self)
    }

    fn add_listener(&self, listener: Arc<dyn RepositoryListener>) {
        self.lifecycle.add_listener(listener)
    }

    fn remove_listener(&self, listener: &Arc<dyn RepositoryListener>) -> bool {
        self.lifecycle.remove_listener(listener)
    }

    fn contains_listener(&self, listener: &Arc<dyn RepositoryListener>) -> bool {
        self.lifecycle.contains_listener(listener)
    }

    fn create_resource(&self) -> RepositoryResult<Resource> {
        self.ensure_running()?;
        Ok(Resource::with_random_uri(URI_SCHEME))
    }

    fn save(&self, resource: &Resource) -> RepositoryResult<()> {
        self.ensure_running()?;
        let path = self.path_of(resource.uri())?;
        trace!("[{}] writing {}", self.name(), path.display());
        let stored = StoredResource {
            uri: resource.uri().to_string(),
            records: flatten(&resource.contents),
        };
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut writer, &stored)?;
        writer.flush()?;
        self.cache.lock().remove(resource.uri());
        Ok(())
    }

    fn load_resource(&self, uri: &str) -> RepositoryResult<Resource> {
        self.ensure_running()?;
        if let Some(cached) = self.cache.lock().get(uri) {
            return Ok(cached.clone());
        }
        let path = self.path_of(uri)?;
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RepositoryError::ResourceNotFound(uri.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        let stored: StoredResource = serde_json::from_reader(BufReader::new(file))?;
        let mut resource = Resource::new(stored.uri);
        resource.contents = rebuild(stored.records)?;
        self.cache.lock().insert(uri.to_string(), resource.clone());
        Ok(resource)
    }

    fn unload_resource(&self, resource: Resource) -> RepositoryResult<()> {
        self.cache.lock().remove(resource.uri());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_of_rejects_foreign_uris() {
        let repo = FileRepository::new("/tmp/unused");
        assert!(repo.path_of("file:/00ff").is_ok());
        assert!(repo.path_of("file:/../etc").is_err());
        assert!(repo.path_of("mem:/00ff").is_err());
        assert!(repo.path_of("file:/").is_err());
    }

    #[test]
    fn test_wipe_missing_dir() {
        let repo = FileRepository::new("/nonexistent/modelbench/work");
        assert!(repo.wipe().is_ok());
        assert_eq!(repo.document_count().unwrap(), 0);
    }

    #[test]
    fn test_temporary_dir_removed_on_drop() {
        let repo = FileRepository::temporary().unwrap();
        let dir = repo.dir().to_path_buf();
        assert!(dir.exists());
        drop(repo);
        assert!(!dir.exists());
    }
}
