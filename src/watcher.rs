// bffindent - Indentation inference and completion for FASTBuild BFF files
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! File watching for `check --watch`.
//!
//! Editors save in different ways: some truncate and write, others write a
//! temp file and rename it over the original. Watching the parent directory
//! and filtering by file name covers both.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tracing::debug;

/// Rapid events within this window collapse into one change.
const DEBOUNCE_DURATION: Duration = Duration::from_millis(100);

/// Errors that can occur while watching files.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Failed to create watcher: {0}")]
    Create(#[source] notify::Error),

    #[error("Cannot resolve path {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("Watch channel closed")]
    ChannelClosed,

    #[error("Watch error: {0}")]
    Event(#[source] notify::Error),
}

impl WatchError {
    /// Whether watching cannot go on after this error.
    ///
    /// Only a failed event is transient; a closed channel never delivers
    /// again.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, WatchError::Event(_))
    }
}

/// Watches BFF files for changes.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use bffindent::watcher::SourceWatcher;
///
/// let watcher = SourceWatcher::new(&[PathBuf::from("fbuild.bff")])?;
/// let changed = watcher.wait_for_change()?;
/// println!("changed: {:?}", changed);
/// # Ok::<(), bffindent::watcher::WatchError>(())
/// ```
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<Result<Event, notify::Error>>,
    paths: Vec<PathBuf>,
}

impl SourceWatcher {
    /// Start watching `paths`.
    ///
    /// # Errors
    ///
    /// Fails if a path cannot be canonicalized or its directory cannot be
    /// watched.
    pub fn new(paths: &[PathBuf]) -> Result<Self, WatchError> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx).map_err(WatchError::Create)?;

        let mut canonical_paths = Vec::with_capacity(paths.len());
        let mut watched_dirs = HashSet::new();

        for path in paths {
            let canonical = path.canonicalize().map_err(|source| WatchError::Resolve {
                path: path.clone(),
                source,
            })?;

            if let Some(parent) = canonical.parent() {
                if watched_dirs.insert(parent.to_path_buf()) {
                    watcher
                        .watch(parent, RecursiveMode::NonRecursive)
                        .map_err(|source| WatchError::Watch {
                            path: parent.to_path_buf(),
                            source,
                        })?;
                }
            }

            canonical_paths.push(canonical);
        }

        Ok(Self {
            _watcher: watcher,
            rx,
            paths: canonical_paths,
        })
    }

    /// The canonical paths being watched.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Block until a watched file changes.
    ///
    /// Returns the watched paths touched by the change, debounced over
    /// [`DEBOUNCE_DURATION`].
    pub fn wait_for_change(&self) -> Result<Vec<PathBuf>, WatchError> {
        loop {
            let event = self
                .rx
                .recv()
                .map_err(|_| WatchError::ChannelClosed)?
                .map_err(WatchError::Event)?;

            let mut changed = self.relevant_paths(&event);
            if changed.is_empty() {
                continue;
            }

            std::thread::sleep(DEBOUNCE_DURATION);

            // Fold in whatever arrived during the debounce window
            while let Ok(pending) = self.rx.try_recv() {
                if let Ok(event) = pending {
                    for path in self.relevant_paths(&event) {
                        if !changed.contains(&path) {
                            changed.push(path);
                        }
                    }
                }
            }

            debug!(count = changed.len(), "watched files changed");
            return Ok(changed);
        }
    }

    /// Watched paths an event refers to, for modify and create events only.
    fn relevant_paths(&self, event: &Event) -> Vec<PathBuf> {
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return Vec::new();
        }

        let mut found = Vec::new();
        for event_path in &event.paths {
            if let Some(watched) = self.match_path(event_path) {
                if !found.contains(watched) {
                    found.push(watched.clone());
                }
            }
        }
        found
    }

    fn match_path(&self, path: &Path) -> Option<&PathBuf> {
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        // A renamed-over file may not resolve yet, so fall back to
        // comparing parent and file name
        self.paths.iter().find(|watched| {
            **watched == canonical
                || (canonical.file_name() == watched.file_name()
                    && canonical.parent() == watched.parent())
        })
    }
}
