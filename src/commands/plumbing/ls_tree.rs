use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::{Revision, resolve_object_id};
use crate::artifacts::objects::object::{Object, ObjectBox};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use std::io::Write;

impl Repository {
    /// List a tree, or the root tree of a commit.
    ///
    /// With `recursive`, subtrees are expanded and only files are listed,
    /// each with its full path.
    pub fn ls_tree(&self, tree_ish: &str, recursive: bool) -> Result<()> {
        let tree_oid = self.resolve_tree_ish(tree_ish)?;

        if recursive {
            for (path, entry) in self.database().flatten_tree(&tree_oid)? {
                writeln!(
                    self.writer(),
                    "{:0>6} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.mode.object_type(),
                    entry.oid,
                    path
                )?;
            }
        } else {
            let tree = self.database().parse_object_as_tree(&tree_oid)?;
            if !tree.is_empty() {
                writeln!(self.writer(), "{}", tree.display())?;
            }
        }

        Ok(())
    }

    fn resolve_tree_ish(&self, tree_ish: &str) -> Result<ObjectId> {
        // revisions first, so `HEAD` and branch names work; then raw IDs of
        // any kind when the text names no commit
        let object_id = match Revision::try_parse(tree_ish).and_then(|rev| rev.resolve(self)) {
            Ok(commit_oid) => commit_oid,
            Err(Error::InvalidRevision(_) | Error::UnexpectedObjectKind { .. }) => {
                resolve_object_id(tree_ish, self, None)?
            }
            Err(error) => return Err(error),
        };

        match self.database().parse_object(&object_id)? {
            ObjectBox::Commit(commit) => Ok(commit.tree_oid().clone()),
            ObjectBox::Tree(_) => Ok(object_id),
            ObjectBox::Blob(_) => Err(Error::UnexpectedObjectKind {
                oid: object_id,
                expected: ObjectType::Tree,
                actual: ObjectType::Blob,
            }),
        }
    }
}
