use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::errors::Result;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Create `branch_name` at `start_point`, or at the HEAD commit.
    pub fn branch(&self, branch_name: &str, start_point: Option<&str>) -> Result<()> {
        let branch_name = BranchName::try_parse(branch_name)?;

        let start_oid = match start_point {
            Some(start_point) => Revision::try_parse(start_point)?.resolve(self)?,
            None => self.head_commit()?,
        };
        // only commits can be branched from
        self.database().parse_object_as_commit(&start_oid)?;

        self.refs().create_branch(&branch_name, &start_oid)?;
        tracing::info!(branch = %branch_name, at = %start_oid, "created branch");

        Ok(())
    }

    pub fn delete_branch(&self, branch_name: &str) -> Result<()> {
        let branch_name = BranchName::try_parse(branch_name)?;
        let oid = self.refs().delete_branch(&branch_name)?;
        tracing::info!(branch = %branch_name, was = %oid, "deleted branch");

        writeln!(
            self.writer(),
            "Deleted branch {} (was {}).",
            branch_name,
            oid.to_short_oid()
        )?;

        Ok(())
    }

    /// Print every branch, marking the current one with `*`.
    pub fn list_branches(&self) -> Result<()> {
        let current = self.refs().current_branch()?;

        for branch in self.refs().list_branches()? {
            if current.as_ref() == Some(&branch) {
                writeln!(self.writer(), "* {}", branch.to_string().green())?;
            } else {
                writeln!(self.writer(), "  {branch}")?;
            }
        }

        Ok(())
    }
}
