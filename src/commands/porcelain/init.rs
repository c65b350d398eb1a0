use crate::areas::repository::{DEFAULT_BRANCH, Repository};
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::{Error, IoContext, Result};
use std::fs;
use std::io::Write;

impl Repository {
    /// Create `.cairn` with an empty object store, no branches, HEAD
    /// attached to the default branch, and an empty index.
    pub fn init(&self) -> Result<()> {
        let repository_path = self.repository_path();
        if repository_path.exists() {
            return Err(Error::AlreadyInitialized(repository_path));
        }

        let objects_path = self.database().objects_path();
        fs::create_dir_all(objects_path).at_path(objects_path)?;

        let heads_path = self.refs().heads_path();
        fs::create_dir_all(&heads_path).at_path(&heads_path)?;

        self.refs()
            .set_head_symbolic(&BranchName::try_parse(DEFAULT_BRANCH)?)?;

        let mut index = self.index();
        index.clear();
        index.write_updates()?;

        tracing::debug!(path = %repository_path.display(), "initialized repository");
        writeln!(
            self.writer(),
            "Initialized empty cairn repository in {}",
            repository_path.display()
        )?;

        Ok(())
    }
}
