use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::collections::HashSet;

/// First-parent history, newest first, starting at one commit.
///
/// Each commit is yielded at most once, so a cycle in corrupted data ends
/// the walk instead of looping. A commit that cannot be read is yielded as
/// an error and ends the walk.
pub struct RevList<'r> {
    database: &'r Database,
    next_oid: Option<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'r> RevList<'r> {
    pub fn new(database: &'r Database, start: Option<ObjectId>) -> Self {
        RevList {
            database,
            next_oid: start,
            visited: HashSet::new(),
        }
    }
}

impl Iterator for RevList<'_> {
    type Item = Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.next_oid.take()?;
        if !self.visited.insert(commit_oid.clone()) {
            tracing::warn!(oid = %commit_oid, "history revisits a commit, stopping");
            return None;
        }

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(commit) => {
                self.next_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(error) => Some(Err(error)),
        }
    }
}
