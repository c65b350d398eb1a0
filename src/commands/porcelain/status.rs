use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::{ChangeSet, Status, StatusInfo};
use crate::errors::Result;
use colored::Colorize;
use std::io::Write;

// Terminology:
// - staged changes: the index differs from HEAD's tree
// - unstaged changes: a staged file differs from, or is missing in, the working tree
// - untracked files: files the index does not know about
impl Repository {
    pub fn status(&self, porcelain: bool) -> Result<()> {
        let status_info = {
            let mut index = self.index();
            index.rehydrate()?;
            Status::new(self).inspect(&index)?
        };

        if porcelain {
            self.print_porcelain_status(&status_info)
        } else {
            self.print_long_status(&status_info)
        }
    }

    fn print_porcelain_status(&self, status_info: &StatusInfo) -> Result<()> {
        let mut writer = self.writer();

        for (path, change) in &status_info.changed_files {
            writeln!(writer, "{change} {path}")?;
        }
        for path in &status_info.untracked_files {
            writeln!(writer, "?? {path}")?;
        }

        Ok(())
    }

    fn print_long_status(&self, status_info: &StatusInfo) -> Result<()> {
        match self.refs().read_head()? {
            Head::Symbolic(branch) => writeln!(self.writer(), "On branch {branch}")?,
            Head::Detached(oid) => {
                writeln!(self.writer(), "{}", format!("HEAD detached at {}", oid.to_short_oid()).red())?
            }
        }
        if self.refs().read_head_oid()?.is_none() {
            writeln!(self.writer(), "\nNo commits yet")?;
        }

        let index_changes = status_info.index_changeset();
        let workspace_changes = status_info.workspace_changeset();

        self.print_changeset("Changes to be committed:", &index_changes)?;
        self.print_changeset("Changes not staged for commit:", &workspace_changes)?;

        if !status_info.untracked_files.is_empty() {
            let mut writer = self.writer();
            writeln!(writer, "\nUntracked files:")?;
            for path in &status_info.untracked_files {
                writeln!(writer, "        {}", path.red())?;
            }
        }

        let summary = if !index_changes.is_empty() {
            None
        } else if !workspace_changes.is_empty() {
            Some("no changes added to commit")
        } else if !status_info.untracked_files.is_empty() {
            Some("nothing added to commit but untracked files present")
        } else {
            Some("nothing to commit, working tree clean")
        };
        if let Some(summary) = summary {
            writeln!(self.writer(), "\n{summary}")?;
        }

        Ok(())
    }

    fn print_changeset(&self, title: &str, changeset: &ChangeSet) -> Result<()> {
        if changeset.is_empty() {
            return Ok(());
        }

        let mut writer = self.writer();
        writeln!(writer, "\n{title}")?;
        for (path, change) in changeset {
            writeln!(writer, "{change}{path}")?;
        }

        Ok(())
    }
}
