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

//! Repository observers.

use super::RepositoryStatus;
use std::error::Error;
use std::fmt;
use tracing::{debug, error, info, warn};

/// Severity of a repository event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventLevel {
    Info,
    Warn,
    Error,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventLevel::Info => "INFO",
            EventLevel::Warn => "WARN",
            EventLevel::Error => "ERROR",
        };
        f.write_str(label)
    }
}

/// Receives status changes and events of a repository.
///
/// Notifications are delivered synchronously on the thread that caused them.
pub trait RepositoryListener: Send + Sync {
    fn status_changed(&self, repository: &str, old: RepositoryStatus, new: RepositoryStatus);

    fn repository_event(
        &self,
        repository: &str,
        level: EventLevel,
        message: &str,
        cause: Option<&(dyn Error + 'static)>,
    );
}

/// Forwards repository notifications to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl RepositoryListener for TracingListener {
    fn status_changed(&self, repository: &str, old: RepositoryStatus, new: RepositoryStatus) {
        debug!("[{}] status changed {} -> {}", repository, old, new);
    }

    fn repository_event(
        &self,
        repository: &str,
        level: EventLevel,
        message: &str,
        cause: Option<&(dyn Error + 'static)>,
    ) {
        let cause = cause.map(|c| c.to_string()).unwrap_or_default();
        match level {
            EventLevel::Info => info!("[{}] {} {}", repository, message, cause),
            EventLevel::Warn => warn!("[{}] {} {}", repository, message, cause),
            EventLevel::Error => error!("[{}] {} {}", repository, message, cause),
        }
    }
}
