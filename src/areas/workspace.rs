//! Working directory access
//!
//! Paths handed to and returned from the workspace are relative to the
//! repository root. The repository directory itself is never listed.

use crate::areas::repository::REPOSITORY_DIR;
use crate::artifacts::index::entry_mode::FileMode;
use crate::artifacts::index::path_key;
use crate::errors::{Error, IoContext, Result};
use bytes::Bytes;
use is_executable::IsExecutable;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every file at or below `root` (relative), as sorted index keys.
    ///
    /// A missing `root` is `PathNotFound`.
    pub fn list_files(&self, root: &Path) -> Result<Vec<String>> {
        let absolute_root = self.path.join(root);

        if !absolute_root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }
        if Self::is_ignored(root) {
            return Ok(Vec::new());
        }

        if absolute_root.is_file() {
            return Ok(vec![path_key(root)]);
        }

        let mut files = WalkDir::new(&absolute_root)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != REPOSITORY_DIR)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&self.path).ok()?;
                Some(path_key(relative))
            })
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    /// Immediate children of a relative directory, skipping the repository
    /// directory. Directories are reported with `is_dir = true`.
    pub fn list_dir(&self, dir: &Path) -> Result<Vec<(String, bool)>> {
        let absolute_dir = self.path.join(dir);

        let mut children = Vec::new();
        for entry in std::fs::read_dir(&absolute_dir).at_path(&absolute_dir)? {
            let entry = entry.at_path(&absolute_dir)?;
            if entry.file_name() == REPOSITORY_DIR {
                continue;
            }

            let relative = dir.join(entry.file_name());
            let is_dir = entry.file_type().at_path(entry.path())?.is_dir();
            children.push((path_key(&relative), is_dir));
        }
        children.sort();

        Ok(children)
    }

    pub fn read_file(&self, file_path: &Path) -> Result<Bytes> {
        let absolute = self.path.join(file_path);
        let content = std::fs::read(&absolute).at_path(&absolute)?;

        Ok(content.into())
    }

    pub fn file_mode(&self, file_path: &Path) -> FileMode {
        FileMode::from_executable(self.path.join(file_path).is_executable())
    }

    pub fn is_file(&self, file_path: &Path) -> bool {
        self.path.join(file_path).is_file()
    }

    pub fn is_dir(&self, dir_path: &Path) -> bool {
        self.path.join(dir_path).is_dir()
    }

    /// Write a blob to `file_path`, creating parent directories and replacing
    /// whatever is in the way: a file where a directory is needed, or a
    /// directory where the file goes.
    pub fn write_file(&self, file_path: &Path, content: &[u8], mode: FileMode) -> Result<()> {
        let absolute = self.path.join(file_path);
        let workspace_error = |source| Error::WorkspaceWrite {
            path: file_path.to_path_buf(),
            source,
        };

        if let Some(parent) = file_path.parent() {
            self.make_directory(parent)?;
        }

        if absolute.is_dir() {
            std::fs::remove_dir_all(&absolute).map_err(workspace_error)?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&absolute)
            .map_err(workspace_error)?;
        file.write_all(content).map_err(workspace_error)?;
        drop(file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let bits = if mode.is_executable() { 0o755 } else { 0o644 };
            std::fs::set_permissions(&absolute, std::fs::Permissions::from_mode(bits))
                .map_err(workspace_error)?;
        }
        #[cfg(not(unix))]
        let _ = mode;

        Ok(())
    }

    /// Ensure every component of `dir_path` is a directory, removing files
    /// that occupy any of them.
    pub fn make_directory(&self, dir_path: &Path) -> Result<()> {
        let mut current = PathBuf::new();

        for component in dir_path.components() {
            current.push(component);
            let absolute = self.path.join(&current);
            let workspace_error = |source| Error::WorkspaceWrite {
                path: current.clone(),
                source,
            };

            match std::fs::symlink_metadata(&absolute) {
                Ok(metadata) if metadata.is_dir() => continue,
                Ok(_) => std::fs::remove_file(&absolute).map_err(workspace_error)?,
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
                Err(error) => return Err(workspace_error(error)),
            }
            std::fs::create_dir(&absolute).map_err(workspace_error)?;
        }

        Ok(())
    }

    /// Remove a tracked file and then every parent directory that became
    /// empty, stopping at the repository root. Missing files are ignored.
    pub fn remove_file(&self, file_path: &Path) -> Result<()> {
        let absolute = self.path.join(file_path);

        match std::fs::symlink_metadata(&absolute) {
            Ok(metadata) if metadata.is_dir() => {
                std::fs::remove_dir_all(&absolute).map_err(|source| Error::WorkspaceWrite {
                    path: file_path.to_path_buf(),
                    source,
                })?
            }
            Ok(_) => std::fs::remove_file(&absolute).map_err(|source| Error::WorkspaceWrite {
                path: file_path.to_path_buf(),
                source,
            })?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => return Err(Error::io(absolute, error)),
        }

        let mut parent = file_path.parent();
        while let Some(dir) = parent.filter(|dir| !dir.as_os_str().is_empty()) {
            let absolute_dir = self.path.join(dir);
            let is_empty = match std::fs::read_dir(&absolute_dir) {
                Ok(mut entries) => entries.next().is_none(),
                Err(_) => false,
            };
            if !is_empty {
                break;
            }

            if let Err(error) = std::fs::remove_dir(&absolute_dir) {
                tracing::warn!(path = %dir.display(), %error, "could not prune empty directory");
                break;
            }
            parent = dir.parent();
        }

        Ok(())
    }

    fn is_ignored(path: &Path) -> bool {
        path.components()
            .any(|component| component.as_os_str() == REPOSITORY_DIR)
    }
}
