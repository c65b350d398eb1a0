use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::path_key;
use crate::artifacts::objects::blob::Blob;
use crate::errors::{Error, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

impl Repository {
    /// Stage files and directories (recursively).
    ///
    /// Every path is checked before anything is staged, so one missing path
    /// leaves the index untouched. Staged files below a directory argument
    /// that no longer exist in the working tree are unstaged.
    pub fn add(&self, paths: &[PathBuf]) -> Result<()> {
        let mut index = self.index();
        index.rehydrate()?;

        let mut targets = Vec::with_capacity(paths.len());
        for path in paths {
            let relative = self.relative_path(path)?;
            let files = self
                .workspace()
                .list_files(&relative)
                .map_err(|error| match error {
                    Error::PathNotFound(_) => Error::PathNotFound(path.clone()),
                    other => other,
                })?;
            targets.push((path_key(&relative), files));
        }

        for (key, files) in targets {
            let present = files.iter().map(String::as_str).collect::<BTreeSet<_>>();
            for stale in index.entries_under(&key) {
                if !present.contains(stale.as_str()) {
                    tracing::debug!(path = %stale, "unstaging deleted file");
                    index.remove(&stale);
                }
            }

            for file in files {
                let file_path = Path::new(&file);
                let blob = Blob::new(self.workspace().read_file(file_path)?);
                let mode = self.workspace().file_mode(file_path);

                let oid = self.database().store(&blob)?;
                tracing::trace!(path = %file, %oid, "staged");
                index.add(file, IndexEntry::new(oid, mode));
            }
        }

        index.write_updates()?;

        Ok(())
    }
}
