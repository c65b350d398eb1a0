use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Author;
use crate::commands::plumbing::commit_tree::normalize_message;
use crate::errors::Result;
use std::io::Write;

impl Repository {
    /// Commit the index on top of HEAD and advance the current branch (or
    /// HEAD itself when detached). The index is left as it is.
    ///
    /// `author` overrides the identity from the environment; the
    /// `CAIRN_AUTHOR_DATE` timestamp still applies to it.
    pub fn commit(&self, message: &str, author: Option<Author>, allow_empty: bool) -> Result<()> {
        let tree_oid = self.write_index_tree()?;
        let parent = self.refs().read_head_oid()?;

        let author = match author {
            Some(author) => match Author::timestamp_from_env() {
                Some(timestamp) => author.with_timestamp(timestamp),
                None => author,
            },
            None => Author::load_from_env(),
        };
        let message = normalize_message(message);
        let subject = message.lines().next().unwrap_or_default().to_string();

        let is_root = parent.is_none();
        let commit_oid = self.write_commit(
            &tree_oid,
            parent.into_iter().collect(),
            author,
            message,
            allow_empty,
        )?;
        self.refs().update_head(&commit_oid)?;

        let head_label = match self.refs().read_head()? {
            Head::Symbolic(branch) => branch.to_string(),
            Head::Detached(_) => "detached HEAD".to_string(),
        };
        let root_label = if is_root { " (root-commit)" } else { "" };

        writeln!(
            self.writer(),
            "[{head_label}{root_label} {}] {subject}",
            commit_oid.to_short_oid()
        )?;

        Ok(())
    }
}
