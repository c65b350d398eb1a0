//! The commit writer
//!
//! Turns a root tree, parents, an author, and a message into a stored
//! commit object. It never moves refs; `commit` advances HEAD afterwards.

use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::{Revision, resolve_object_id};
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use std::io::Write;

impl Repository {
    /// `commit-tree <tree> [-p <parent>]... -m <message>`
    ///
    /// Prints the new commit's ID. Empty commits are allowed here, as the
    /// caller chose the tree explicitly.
    pub fn commit_tree(&self, tree: &str, parents: &[String], message: &str) -> Result<()> {
        let tree_oid = resolve_object_id(tree, self, Some(ObjectType::Tree))?;
        let parents = parents
            .iter()
            .map(|parent| Revision::try_parse(parent)?.resolve(self))
            .collect::<Result<Vec<_>>>()?;

        let commit_oid = self.write_commit(
            &tree_oid,
            parents,
            Author::load_from_env(),
            normalize_message(message),
            true,
        )?;
        writeln!(self.writer(), "{commit_oid}")?;

        Ok(())
    }

    /// Store a commit for `tree_oid` with `parents` (first parent first).
    ///
    /// Unless `allow_empty` is set, a tree identical to the first parent's
    /// tree is refused with `EmptyCommit`. Root commits are always allowed.
    pub fn write_commit(
        &self,
        tree_oid: &ObjectId,
        parents: Vec<ObjectId>,
        author: Author,
        message: String,
        allow_empty: bool,
    ) -> Result<ObjectId> {
        let database = self.database();
        // the tree must exist and be a tree
        database.parse_object_as_tree(tree_oid)?;

        if !allow_empty && let Some(first_parent) = parents.first() {
            let parent = database.parse_object_as_commit(first_parent)?;
            if parent.tree_oid() == tree_oid {
                return Err(Error::EmptyCommit);
            }
        }

        let commit = Commit::new(parents, tree_oid.clone(), author, message);
        let commit_oid = database.store(&commit)?;
        tracing::info!(commit = %commit_oid, tree = %tree_oid, "wrote commit");

        Ok(commit_oid)
    }
}

/// Trim surrounding whitespace and end the message with one newline.
pub(crate) fn normalize_message(message: &str) -> String {
    format!("{}\n", message.trim())
}
