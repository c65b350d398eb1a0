//! References (branches and HEAD)
//!
//! References are human-readable names pointing to commits:
//!
//! - `refs/heads/<name>` holds the digest of a branch tip
//! - `HEAD` names the current branch symbolically (`ref: refs/heads/<name>`)
//!   or holds a digest directly when detached
//!
//! ## File Format
//!
//! Every ref file is one line terminated by `\n`. Writes go through a
//! temporary sibling and a rename, so a crash leaves either the old or the
//! new content. There is no compare-and-swap: concurrent updates of the same
//! ref are last-write-wins.

use crate::artifacts::branch::branch_name::{BranchName, HEAD_REF_NAME};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoContext, Result};
use derive_new::new;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SYMREF_PREFIX: &str = "ref: ";

/// What HEAD points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// Attached to a branch, which may not exist yet
    Symbolic(BranchName),
    /// Pointing straight at a commit
    Detached(ObjectId),
}

/// References manager rooted at the repository directory (`.cairn`).
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    pub fn read_head(&self) -> Result<Head> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path).at_path(&head_path)?;
        let content = content.trim();

        match content.strip_prefix(SYMREF_PREFIX) {
            Some(target) => Ok(Head::Symbolic(BranchName::try_parse_ref_path(target.trim())?)),
            None => Ok(Head::Detached(ObjectId::try_parse(content)?)),
        }
    }

    /// The branch HEAD is attached to, or `None` when detached.
    pub fn current_branch(&self) -> Result<Option<BranchName>> {
        match self.read_head()? {
            Head::Symbolic(branch) => Ok(Some(branch)),
            Head::Detached(_) => Ok(None),
        }
    }

    pub fn is_current_branch(&self, branch: &BranchName) -> Result<bool> {
        Ok(self.current_branch()?.as_ref() == Some(branch))
    }

    /// The commit HEAD resolves to, if any.
    pub fn read_head_oid(&self) -> Result<Option<ObjectId>> {
        match self.read_head()? {
            Head::Symbolic(branch) => self.read_branch(&branch),
            Head::Detached(oid) => Ok(Some(oid)),
        }
    }

    /// The commit HEAD resolves to; `DanglingHead` before the first commit.
    pub fn head_commit(&self) -> Result<ObjectId> {
        match self.read_head()? {
            Head::Symbolic(branch) => self
                .read_branch(&branch)?
                .ok_or_else(|| Error::DanglingHead(format!("branch '{branch}' has no commits yet"))),
            Head::Detached(oid) => Ok(oid),
        }
    }

    /// Resolve `HEAD` or a branch name to a digest. Missing branches resolve
    /// to `None`.
    pub fn resolve(&self, name: &str) -> Result<Option<ObjectId>> {
        if name == HEAD_REF_NAME {
            return self.read_head_oid();
        }

        self.read_branch(&BranchName::try_parse(name)?)
    }

    pub fn read_branch(&self, branch: &BranchName) -> Result<Option<ObjectId>> {
        let branch_path = self.branch_path(branch);
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path).at_path(&branch_path)?;
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }

        Ok(Some(ObjectId::try_parse(content)?))
    }

    pub fn branch_exists(&self, branch: &BranchName) -> bool {
        self.branch_path(branch).is_file()
    }

    pub fn update_branch(&self, branch: &BranchName, oid: &ObjectId) -> Result<()> {
        self.write_ref_file(&self.branch_path(branch), &format!("{oid}\n"))?;
        tracing::debug!(%branch, %oid, "updated branch");

        Ok(())
    }

    /// Move whatever HEAD points at: the current branch, or HEAD itself when
    /// detached.
    pub fn update_head(&self, oid: &ObjectId) -> Result<()> {
        match self.read_head()? {
            Head::Symbolic(branch) => self.update_branch(&branch, oid),
            Head::Detached(_) => self.set_head_detached(oid),
        }
    }

    pub fn set_head_symbolic(&self, branch: &BranchName) -> Result<()> {
        let content = format!("{SYMREF_PREFIX}{}\n", branch.to_ref_path());
        self.write_ref_file(&self.head_path(), &content)?;
        tracing::debug!(%branch, "attached HEAD");

        Ok(())
    }

    pub fn set_head_detached(&self, oid: &ObjectId) -> Result<()> {
        self.write_ref_file(&self.head_path(), &format!("{oid}\n"))?;
        tracing::debug!(%oid, "detached HEAD");

        Ok(())
    }

    pub fn create_branch(&self, branch: &BranchName, oid: &ObjectId) -> Result<()> {
        if branch.is_head() {
            return Err(Error::InvalidBranchName(branch.to_string()));
        }
        if self.branch_exists(branch) {
            return Err(Error::BranchExists(branch.to_string()));
        }

        self.update_branch(branch, oid)
    }

    /// Delete a branch and return the commit it pointed at.
    pub fn delete_branch(&self, branch: &BranchName) -> Result<ObjectId> {
        let oid = self
            .read_branch(branch)?
            .ok_or_else(|| Error::BranchNotFound(branch.to_string()))?;

        if self.is_current_branch(branch)? {
            return Err(Error::CannotDeleteCurrentBranch(branch.to_string()));
        }

        let branch_path = self.branch_path(branch);
        std::fs::remove_file(&branch_path).at_path(&branch_path)?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;
        tracing::debug!(%branch, %oid, "deleted branch");

        Ok(oid)
    }

    /// Every branch under `refs/heads`, sorted by name.
    pub fn list_branches(&self) -> Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");

                // leftover temp files are not valid names
                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn write_ref_file(&self, path: &Path, content: &str) -> Result<()> {
        let parent = path.parent().map(Path::to_path_buf).unwrap_or_else(|| self.path.to_path_buf());
        std::fs::create_dir_all(&parent).at_path(&parent)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = parent.join(format!(".{file_name}.tmp-{}", rand::random::<u32>()));

        let mut file = std::fs::File::create(&temp_path).at_path(&temp_path)?;
        let written = file.write_all(content.as_bytes()).at_path(&temp_path);
        drop(file);

        let renamed = written
            .and_then(|()| std::fs::rename(&temp_path, path).map_err(|error| Error::io(path, error)));
        if renamed.is_err() {
            let _ = std::fs::remove_file(&temp_path);
        }

        renamed
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> Result<()> {
        let heads_path = self.heads_path();

        if let Some(parent) = path.parent()
            && parent != heads_path
            && parent.starts_with(&heads_path)
            && parent.read_dir().at_path(parent)?.next().is_none()
        {
            std::fs::remove_dir(parent).at_path(parent)?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    fn branch_path(&self, branch: &BranchName) -> PathBuf {
        self.path.join(branch.to_ref_path())
    }
}
