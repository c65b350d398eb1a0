//! Nested tree construction from the flat staging index
//!
//! Index keys like `dir/sub/file.txt` are split on `/` and inserted into a
//! builder per directory level. Writing is post-order: every subtree is
//! stored before the tree that references it, and the root digest is
//! returned last.

use crate::areas::database::Database;
use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Result;
use std::collections::BTreeMap;
use std::convert::Infallible;

#[derive(Debug, Clone)]
enum Node {
    File(DatabaseEntry),
    Directory(TreeBuilder),
}

/// One directory level under construction.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    nodes: BTreeMap<String, Node>,
}

impl TreeBuilder {
    /// Group index entries by directory. An empty iterator yields an empty
    /// root.
    pub fn build<'e>(entries: impl IntoIterator<Item = (&'e String, &'e IndexEntry)>) -> Self {
        let mut root = TreeBuilder::default();

        for (path, entry) in entries {
            let components = path.split('/').collect::<Vec<_>>();
            root.add_entry(&components, entry.to_database_entry());
        }

        root
    }

    fn add_entry(&mut self, components: &[&str], entry: DatabaseEntry) {
        match components {
            [] => {}
            [name] => {
                self.nodes.insert((*name).to_string(), Node::File(entry));
            }
            [dir, rest @ ..] => {
                let node = self
                    .nodes
                    .entry((*dir).to_string())
                    .or_insert_with(|| Node::Directory(TreeBuilder::default()));

                // the index never holds a file and a directory at one path,
                // but a stale file node must not swallow the subtree
                if let Node::File(_) = node {
                    *node = Node::Directory(TreeBuilder::default());
                }
                if let Node::Directory(builder) = node {
                    builder.add_entry(rest, entry);
                }
            }
        }
    }

    /// Store every subtree and then this tree; return this tree's digest.
    pub fn write(&self, database: &Database) -> Result<ObjectId> {
        let tree = self.to_tree(&mut |tree| database.store(tree))?;
        database.store(&tree)
    }

    /// Digest of the tree this builder describes, without storing anything.
    pub fn object_id(&self) -> ObjectId {
        let Ok(tree) = self.to_tree(&mut |tree| Ok::<_, Infallible>(tree.object_id()));
        tree.object_id()
    }

    fn to_tree<E>(
        &self,
        store: &mut impl FnMut(&Tree) -> std::result::Result<ObjectId, E>,
    ) -> std::result::Result<Tree, E> {
        let mut tree = Tree::new();

        for (name, node) in &self.nodes {
            let entry = match node {
                Node::File(entry) => entry.clone(),
                Node::Directory(builder) => {
                    let subtree = builder.to_tree(store)?;
                    let oid = store(&subtree)?;
                    DatabaseEntry::new(oid, EntryMode::Directory)
                }
            };
            tree.insert(name.clone(), entry);
        }

        Ok(tree)
    }
}
