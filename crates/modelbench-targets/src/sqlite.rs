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

//! SQLite repository.
//!
//! Resources live in one database file with a `resources` table and a
//! `nodes` table holding flat node records keyed by resource and position.

use crate::records::{flatten, rebuild, NodeRecord};
use modelbench_core::{
    LifecycleHooks, ModelRepository, RepositoryError, RepositoryLifecycle, RepositoryListener,
    RepositoryResult, RepositoryStatus, Resource,
};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::trace;

/// Name the SQLite repository registers under.
pub const SQLITE_REPOSITORY_NAME: &str = "SQLITE";

const DATABASE_FILE: &str = "modelbench.sqlite3";

/// Cases too large for a single-file database.
const UNSUPPORTED_CASES: &[&str] = &["HugeModelTraversalNoCaching"];

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS resources (
    uri TEXT PRIMARY KEY
);
CREATE TABLE IF NOT EXISTS nodes (
    resource TEXT NOT NULL,
    position INTEGER NOT NULL,
    parent INTEGER,
    name TEXT,
    value INTEGER,
    data BLOB,
    PRIMARY KEY (resource, position)
);
";

/// Driver error, surfaced as [`RepositoryError::Backend`].
struct SqliteError(String);

impl From<rusqlite::Error> for SqliteError {
    fn from(e: rusqlite::Error) -> Self {
        SqliteError(e.to_string())
    }
}

impl From<SqliteError> for RepositoryError {
    fn from(e: SqliteError) -> Self {
        RepositoryError::Backend(e.0)
    }
}

/// Repository persisting resources in a SQLite database file.
pub struct SqliteRepository {
    lifecycle: RepositoryLifecycle,
    path: PathBuf,
    connection: Mutex<Option<Connection>>,
}

impl SqliteRepository {
    /// Keeps the database file in `dir`, created on start.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            lifecycle: RepositoryLifecycle::new(SQLITE_REPOSITORY_NAME),
            path: dir.as_ref().join(DATABASE_FILE),
            connection: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> Result<T, SqliteError>,
    ) -> RepositoryResult<T> {
        if self.lifecycle.status() != RepositoryStatus::Running {
            return Err(RepositoryError::NotRunning(self.lifecycle.name().to_string()));
        }
        let mut guard = self.connection.lock();
        let connection = guard
            .as_mut()
            .ok_or_else(|| RepositoryError::NotRunning(self.lifecycle.name().to_string()))?;
        Ok(f(connection)?)
    }
}

impl LifecycleHooks for SqliteRepository {
    fn open(&self) -> Result<(), RepositoryError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let connection = Connection::open(&self.path).map_err(SqliteError::from)?;
        connection.execute_batch(SCHEMA).map_err(SqliteError::from)?;
        *self.connection.lock() = Some(connection);
        Ok(())
    }

    fn close(&self) -> Result<(), RepositoryError> {
        if let Some(connection) = self.connection.lock().take() {
            connection
                .close()
                .map_err(|(_, e)| RepositoryError::Backend(e.to_string()))?;
        }
        Ok(())
    }

    fn wipe(&self) -> Result<(), RepositoryError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

impl ModelRepository for SqliteRepository {
    fn name(&self) -> &str {
        self.lifecycle.name()
    }

    fn uri(&self) -> String {
        format!("sqlite://{}", self.path.display())
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

    fn supports(&self, case_name: &str) -> bool {
        !UNSUPPORTED_CASES.contains(&case_name)
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
        self.with_connection(|_| Ok(()))?;
        Ok(Resource::with_random_uri("sqlite"))
    }

    fn save(&self, resource: &Resource) -> RepositoryResult<()> {
        let records = flatten(&resource.contents);
        trace!("[{}] inserting {} rows", self.name(), records.len());
        self.with_connection(|connection| {
            let tx = connection.transaction()?;
            tx.execute(
                "INSERT OR REPLACE INTO resources (uri) VALUES (?1)",
                params![resource.uri()],
            )?;
            tx.execute("DELETE FROM nodes WHERE resource = ?1", params![resource.uri()])?;
            {
                let mut insert = tx.prepare(
                    "INSERT INTO nodes (resource, position, parent, name, value, data)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )?;
                for (position, record) in records.iter().enumerate() {
                    insert.execute(params![
                        resource.uri(),
                        position as i64,
                        record.parent.map(|p| p as i64),
                        record.name,
                        record.value,
                        record.data,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
    }

    fn load_resource(&self, uri: &str) -> RepositoryResult<Resource> {
        let records = self.with_connection(|connection| {
            let known: Option<String> = connection
                .query_row(
                    "SELECT uri FROM resources WHERE uri = ?1",
                    params![uri],
                    |row| row.get(0),
                )
                .optional()?;
            if known.is_none() {
                return Ok(None);
            }
            let mut select = connection.prepare(
                "SELECT parent, name, value, data FROM nodes
                 WHERE resource = ?1 ORDER BY position",
            )?;
            let rows = select.query_map(params![uri], |row| {
                let parent: Option<i64> = row.get(0)?;
                Ok(NodeRecord {
                    parent: parent.map(|p| p as usize),
                    name: row.get(1)?,
                    value: row.get(2)?,
                    data: row.get(3)?,
                })
            })?;
            let records = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(Some(records))
        })?;

        let records = records.ok_or_else(|| RepositoryError::ResourceNotFound(uri.to_string()))?;
        let mut resource = Resource::new(uri);
        resource.contents = rebuild(records)?;
        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelbench_core::{ModelGenerator, ModelProperties};

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepository::new(dir.path());
        repo.start();
        assert_eq!(repo.status(), RepositoryStatus::Running);

        let props = ModelProperties::new(50, 4, 6, 8).unwrap();
        let model = ModelGenerator::with_seed(3).generate(&props).unwrap();
        let uri = repo.save_model(&model).unwrap();

        repo.restart();
        let resource = repo.load_resource(&uri).unwrap();
        assert_eq!(resource.contents.first(), model.root());
        assert!(matches!(
            repo.load_resource("sqlite:/missing"),
            Err(RepositoryError::ResourceNotFound(_))
        ));
    }

    #[test]
    fn test_clean_removes_database() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepository::new(dir.path());
        repo.start();
        assert!(repo.path().exists());

        repo.stop();
        repo.clean();
        assert!(!repo.path().exists());
        assert_eq!(repo.status(), RepositoryStatus::Stopped);
    }

    #[test]
    fn test_huge_traversal_unsupported() {
        let repo = SqliteRepository::new("unused");
        assert!(!repo.supports("HugeModelTraversalNoCaching"));
        assert!(repo.supports("ModelTraversalCaching"));
    }
}
