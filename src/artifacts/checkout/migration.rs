use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::parent_dirs;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A planned move of the working tree from the current tree to a target
/// tree.
pub struct Migration<'r> {
    repository: &'r Repository,
    /// Files of the tree HEAD points at (empty before the first commit)
    current: BTreeMap<String, DatabaseEntry>,
    target_tree: ObjectId,
    /// Files of the target tree
    target: BTreeMap<String, DatabaseEntry>,
}

impl<'r> Migration<'r> {
    pub fn new(
        repository: &'r Repository,
        current_tree: Option<&ObjectId>,
        target_tree: &ObjectId,
    ) -> Result<Self> {
        let database = repository.database();
        let current = match current_tree {
            Some(tree_oid) => database.flatten_tree(tree_oid)?,
            None => BTreeMap::new(),
        };
        let target = database.flatten_tree(target_tree)?;

        Ok(Self {
            repository,
            current,
            target_tree: target_tree.clone(),
            target,
        })
    }

    /// `UncommittedChanges` unless the index mirrors the current tree.
    pub fn check_index(&self, index: &Index) -> Result<()> {
        let entries = index.entries();

        let same_paths = entries.len() == self.current.len();
        let same_files = entries.iter().all(|(path, entry)| {
            self.current
                .get(path)
                .is_some_and(|committed| entry.matches(committed))
        });

        if same_paths && same_files {
            Ok(())
        } else {
            Err(Error::UncommittedChanges)
        }
    }

    /// `UntrackedOverwritten` when a file the current tree does not track
    /// sits where the target tree needs to write: at a target path, below a
    /// directory occupying a target path, or in place of a parent directory.
    /// An untracked file already holding the target content is kept.
    pub fn check_untracked(&self) -> Result<()> {
        for (path, entry) in &self.target {
            if self.current.contains_key(path) {
                continue;
            }

            if let Some(blocking) = self.untracked_obstacle(path, entry)? {
                return Err(Error::UntrackedOverwritten(PathBuf::from(blocking)));
            }
        }

        Ok(())
    }

    fn untracked_obstacle(&self, path: &str, entry: &DatabaseEntry) -> Result<Option<String>> {
        let workspace = self.repository.workspace();
        let untracked = |candidate: &str| !self.current.contains_key(candidate);

        if let Some(parent) = parent_dirs(path)
            .into_iter()
            .find(|dir| untracked(dir) && workspace.is_file(Path::new(dir)))
        {
            return Ok(Some(parent.to_owned()));
        }

        let file_path = Path::new(path);
        if workspace.is_dir(file_path) {
            let nested = workspace.list_files(file_path)?;
            return Ok(nested.into_iter().find(|nested| untracked(nested)));
        }

        if workspace.is_file(file_path) {
            let content = workspace.read_file(file_path)?;
            if Blob::new(content).object_id() != entry.oid {
                return Ok(Some(path.to_owned()));
            }
        }

        Ok(None)
    }

    /// Tracked paths that the target tree does not contain.
    pub fn stale_paths(&self) -> Vec<&str> {
        self.current
            .keys()
            .filter(|path| !self.target.contains_key(*path))
            .map(String::as_str)
            .collect()
    }

    /// Update the working tree and the index.
    pub fn apply(&self, index: &mut Index) -> Result<()> {
        let workspace = self.repository.workspace();

        for path in self.stale_paths() {
            tracing::debug!(path, "removing stale file");
            workspace.remove_file(Path::new(path))?;
        }

        self.materialize(&self.target_tree, Path::new(""))?;
        index.replace_with(&self.target);

        Ok(())
    }

    fn materialize(&self, tree_oid: &ObjectId, prefix: &Path) -> Result<()> {
        let database = self.repository.database();
        let workspace = self.repository.workspace();
        let tree = database.parse_object_as_tree(tree_oid)?;

        for (name, entry) in tree.into_entries() {
            let path = prefix.join(&name);

            match entry.mode {
                EntryMode::Directory => {
                    workspace.make_directory(&path)?;
                    self.materialize(&entry.oid, &path)?;
                }
                EntryMode::File(mode) => {
                    let blob = database.parse_object_as_blob(&entry.oid)?;
                    tracing::trace!(path = %path.display(), oid = %entry.oid, "writing file");
                    workspace.write_file(&path, blob.content(), mode)?;
                }
            }
        }

        Ok(())
    }
}
