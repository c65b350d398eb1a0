//! Staging index
//!
//! The index tracks which files go into the next commit: a sorted map from
//! repository-relative path to the staged blob and its mode. It is persisted
//! as JSON (see `artifacts::index`) and rewritten atomically.
//!
//! ## Data Structures
//!
//! - `entries`: staged files keyed by `/`-separated path
//! - `children`: every directory that contains staged files, mapped to those
//!   files, so replacing a directory with a file (or the reverse) is cheap

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::{VERSION, is_safe_key, parent_dirs};
use crate::errors::{Error, IoContext, Result};
use fake::rand;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

/// On-disk shape of the index file.
#[derive(Debug, Serialize, Deserialize)]
struct IndexFile {
    version: u32,
    entries: BTreeMap<String, IndexEntry>,
}

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (`.cairn/index`)
    path: Box<Path>,
    entries: BTreeMap<String, IndexEntry>,
    children: BTreeMap<String, BTreeSet<String>>,
    /// Set when the in-memory index differs from the file
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            children: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    /// Whether `path` is a staged file or a directory containing one.
    pub fn is_tracked(&self, path: &str) -> bool {
        self.entries.contains_key(path) || self.children.contains_key(path)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.children.clear();
        self.changed = true;
    }

    /// Load the index from disk. A missing or empty file is an empty index.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.entries.clear();
        self.children.clear();
        self.changed = false;

        let content = match std::fs::read(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(error) => return Err(Error::io(self.path.to_path_buf(), error)),
        };
        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }

        let index_file: IndexFile =
            serde_json::from_slice(&content).map_err(|source| Error::Index {
                path: self.path.to_path_buf(),
                source,
            })?;
        if index_file.version != VERSION {
            tracing::warn!(
                version = index_file.version,
                "reading index written with an unknown version"
            );
        }

        if let Some(path) = index_file.entries.keys().find(|path| !is_safe_key(path)) {
            return Err(Error::Index {
                path: self.path.to_path_buf(),
                source: serde::de::Error::custom(format!("unsafe index path '{path}'")),
            });
        }

        for (path, entry) in index_file.entries {
            self.store_entry(path, entry);
        }
        tracing::debug!(entries = self.entries.len(), "loaded index");

        Ok(())
    }

    /// Persist the index if it changed. The file is written to a temporary
    /// sibling and renamed into place.
    pub fn write_updates(&mut self) -> Result<()> {
        if !self.changed {
            return Ok(());
        }

        let index_file = IndexFile {
            version: VERSION,
            entries: self.entries.clone(),
        };
        let content = serde_json::to_vec_pretty(&index_file).map_err(|source| Error::Index {
            path: self.path.to_path_buf(),
            source,
        })?;

        let temp_path = self
            .path
            .with_file_name(format!("index.tmp-{}", rand::random::<u32>()));
        let mut file = std::fs::File::create(&temp_path).at_path(&temp_path)?;
        let written = file
            .write_all(&content)
            .and_then(|()| file.write_all(b"\n"))
            .at_path(&temp_path);
        drop(file);

        let renamed = written
            .and_then(|()| std::fs::rename(&temp_path, &self.path).at_path(self.path.to_path_buf()));
        if let Err(error) = renamed {
            let _ = std::fs::remove_file(&temp_path);
            return Err(error);
        }

        self.changed = false;
        tracing::debug!(entries = self.entries.len(), "wrote index");

        Ok(())
    }

    /// Stage `entry` at `path`, discarding whatever conflicts with it: a
    /// staged file at any parent directory, or staged files below `path`.
    pub fn add(&mut self, path: String, entry: IndexEntry) {
        self.discard_conflicts(&path);
        self.store_entry(path, entry);
        self.changed = true;
    }

    /// Unstage `path`, or every file below it when it names a directory.
    pub fn remove(&mut self, path: &str) {
        self.remove_entry(path);
        self.remove_children(path);
        self.changed = true;
    }

    /// Replace the whole index with the files of a flattened tree.
    pub fn replace_with(&mut self, files: &BTreeMap<String, DatabaseEntry>) {
        self.entries.clear();
        self.children.clear();

        for (path, entry) in files {
            if let Some(entry) = IndexEntry::from_database_entry(entry) {
                self.store_entry(path.clone(), entry);
            }
        }
        self.changed = true;
    }

    pub fn entries(&self) -> &BTreeMap<String, IndexEntry> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Staged paths equal to `path` or below it. An empty `path` means the
    /// repository root.
    pub fn entries_under(&self, path: &str) -> Vec<String> {
        if path.is_empty() {
            return self.entries.keys().cloned().collect();
        }

        let mut paths = self
            .children
            .get(path)
            .map(|children| children.iter().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        if self.entries.contains_key(path) {
            paths.push(path.to_string());
        }
        paths.sort();

        paths
    }

    fn discard_conflicts(&mut self, path: &str) {
        for parent in parent_dirs(path) {
            self.remove_entry(parent);
        }
        self.remove_children(path);
    }

    fn store_entry(&mut self, path: String, entry: IndexEntry) {
        for parent in parent_dirs(&path) {
            self.children
                .entry(parent.to_string())
                .or_default()
                .insert(path.clone());
        }

        self.entries.insert(path, entry);
    }

    fn remove_children(&mut self, path: &str) {
        if let Some(children) = self.children.remove(path) {
            for child in children {
                self.remove_entry(&child);
            }
        }
    }

    fn remove_entry(&mut self, path: &str) {
        if self.entries.remove(path).is_none() {
            return;
        }

        for parent in parent_dirs(path) {
            if let Some(children) = self.children.get_mut(parent) {
                children.remove(path);
                if children.is_empty() {
                    self.children.remove(parent);
                }
            }
        }
    }
}
