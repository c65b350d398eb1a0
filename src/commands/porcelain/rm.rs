use crate::areas::repository::Repository;
use crate::artifacts::index::path_key;
use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};

impl Repository {
    /// Unstage files, or every staged file below a directory.
    ///
    /// Without `cached` the files are deleted from the working tree as
    /// well. A path matching nothing in the index is `PathNotFound`.
    pub fn rm(&self, paths: &[PathBuf], cached: bool) -> Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        let mut targets = Vec::new();
        for path in paths {
            let key = path_key(&self.relative_path(path)?);
            let staged = index.entries_under(&key);
            if staged.is_empty() {
                return Err(Error::PathNotFound(path.clone()));
            }
            targets.extend(staged);
        }

        for target in targets {
            index.remove(&target);
            if !cached && self.workspace().is_file(Path::new(&target)) {
                self.workspace().remove_file(Path::new(&target))?;
            }
            tracing::debug!(path = %target, cached, "removed from index");
        }

        index.write_updates()?;

        Ok(())
    }
}
