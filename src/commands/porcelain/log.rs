use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// `<short-oid> <subject>` per commit instead of the medium format
    pub oneline: bool,
    /// Stop after this many commits
    pub max_count: Option<usize>,
    /// Where to start; HEAD when absent
    pub revision: Option<String>,
}

impl Repository {
    /// Print first-parent history, newest first.
    ///
    /// Without an explicit revision, a repository with no commits prints
    /// nothing.
    pub fn log(&self, options: &LogOptions) -> Result<()> {
        let start = match &options.revision {
            Some(revision) => Some(Revision::try_parse(revision)?.resolve(self)?),
            None => self.refs().read_head_oid()?,
        };

        let history = RevList::new(self.database(), start)
            .take(options.max_count.unwrap_or(usize::MAX));

        for (index, entry) in history.enumerate() {
            let (commit_oid, commit) = entry?;

            if options.oneline {
                self.show_commit_oneline(&commit_oid, &commit)?;
            } else {
                if index > 0 {
                    writeln!(self.writer())?;
                }
                self.show_commit_medium(&commit_oid, &commit)?;
            }
        }

        Ok(())
    }

    fn show_commit_medium(&self, commit_oid: &ObjectId, commit: &Commit) -> Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "{}", format!("commit {commit_oid}").yellow())?;
        if commit.is_merge() {
            let parents = commit
                .parents()
                .iter()
                .map(ObjectId::to_short_oid)
                .collect::<Vec<_>>();
            writeln!(writer, "Merge: {}", parents.join(" "))?;
        }
        writeln!(writer, "Author: {}", commit.author().display_name())?;
        writeln!(writer, "Date:   {}", commit.author().readable_timestamp())?;
        writeln!(writer)?;
        for message_line in commit.message().lines() {
            writeln!(writer, "    {message_line}")?;
        }

        Ok(())
    }

    fn show_commit_oneline(&self, commit_oid: &ObjectId, commit: &Commit) -> Result<()> {
        writeln!(
            self.writer(),
            "{} {}",
            commit_oid.to_short_oid().yellow(),
            commit.short_message()
        )?;

        Ok(())
    }
}
