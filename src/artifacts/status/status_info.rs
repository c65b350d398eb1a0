use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::file_change::{
    FileChange, FileChangeType, IndexChangeType, WorkspaceChangeType,
};
use crate::errors::Result;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub type ChangeSet = BTreeMap<String, FileChangeType>;
pub type HeadTree = BTreeMap<String, DatabaseEntry>;

/// The three-way comparison of HEAD's tree, the index, and the working tree.
#[derive(Debug, Clone, Default)]
pub struct StatusInfo {
    /// Tracked paths with any change, keyed by path
    pub changed_files: BTreeMap<String, FileChange>,
    /// Untracked files, and untracked directories with a trailing `/`
    pub untracked_files: BTreeSet<String>,
}

impl StatusInfo {
    pub fn index_changeset(&self) -> ChangeSet {
        self.changed_files
            .iter()
            .filter(|(_, change)| change.index_change != IndexChangeType::None)
            .map(|(path, change)| (path.clone(), FileChangeType::Index(change.index_change)))
            .collect()
    }

    pub fn workspace_changeset(&self) -> ChangeSet {
        self.changed_files
            .iter()
            .filter(|(_, change)| change.workspace_change != WorkspaceChangeType::None)
            .map(|(path, change)| {
                (
                    path.clone(),
                    FileChangeType::Workspace(change.workspace_change),
                )
            })
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.changed_files.is_empty() && self.untracked_files.is_empty()
    }
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn inspect(&self, index: &Index) -> Result<StatusInfo> {
        let mut present_files = BTreeSet::new();
        let mut untracked_files = BTreeSet::new();
        self.scan_workspace(Path::new(""), index, &mut present_files, &mut untracked_files)?;

        let head_tree = self.load_head_tree()?;
        let mut changed_files = BTreeMap::<String, FileChange>::new();

        for (path, entry) in index.entries() {
            let workspace_change = self.check_index_against_workspace(path, entry, &present_files)?;
            if workspace_change != WorkspaceChangeType::None {
                changed_files.entry(path.clone()).or_default().workspace_change = workspace_change;
            }

            let index_change = check_index_against_head_tree(entry, head_tree.get(path));
            if index_change != IndexChangeType::None {
                changed_files.entry(path.clone()).or_default().index_change = index_change;
            }
        }

        for path in head_tree.keys() {
            if index.entry_by_path(path).is_none() {
                changed_files.entry(path.clone()).or_default().index_change =
                    IndexChangeType::Deleted;
            }
        }

        Ok(StatusInfo {
            changed_files,
            untracked_files,
        })
    }

    /// Walk the working tree. Tracked files are collected; anything not
    /// tracked is reported once at the highest untracked level, and only
    /// when it contains at least one file.
    fn scan_workspace(
        &self,
        dir: &Path,
        index: &Index,
        present_files: &mut BTreeSet<String>,
        untracked_files: &mut BTreeSet<String>,
    ) -> Result<()> {
        let workspace = self.repository.workspace();

        for (path, is_dir) in workspace.list_dir(dir)? {
            if index.is_tracked(&path) {
                if is_dir {
                    self.scan_workspace(Path::new(&path), index, present_files, untracked_files)?;
                } else {
                    present_files.insert(path);
                }
            } else if !is_dir {
                untracked_files.insert(path);
            } else if !workspace.list_files(Path::new(&path))?.is_empty() {
                untracked_files.insert(format!("{path}/"));
            }
        }

        Ok(())
    }

    fn load_head_tree(&self) -> Result<HeadTree> {
        match self.repository.refs().read_head_oid()? {
            Some(head_oid) => {
                let commit = self.repository.database().parse_object_as_commit(&head_oid)?;
                self.repository.database().flatten_tree(commit.tree_oid())
            }
            None => Ok(BTreeMap::new()),
        }
    }

    fn check_index_against_workspace(
        &self,
        path: &str,
        entry: &IndexEntry,
        present_files: &BTreeSet<String>,
    ) -> Result<WorkspaceChangeType> {
        if !present_files.contains(path) {
            return Ok(WorkspaceChangeType::Deleted);
        }

        let workspace = self.repository.workspace();
        let file_path = Path::new(path);
        if workspace.file_mode(file_path) != entry.mode {
            return Ok(WorkspaceChangeType::Modified);
        }

        let oid = Blob::new(workspace.read_file(file_path)?).object_id();
        if oid != entry.oid {
            return Ok(WorkspaceChangeType::Modified);
        }

        Ok(WorkspaceChangeType::None)
    }
}

fn check_index_against_head_tree(
    index_entry: &IndexEntry,
    head_entry: Option<&DatabaseEntry>,
) -> IndexChangeType {
    match head_entry {
        None => IndexChangeType::Added,
        Some(head_entry) if !index_entry.matches(head_entry) => IndexChangeType::Modified,
        Some(_) => IndexChangeType::None,
    }
}
