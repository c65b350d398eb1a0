use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree_builder::TreeBuilder;
use crate::errors::Result;
use std::io::Write;

impl Repository {
    /// Store the tree objects for the current index and print the root.
    pub fn write_tree(&self) -> Result<()> {
        let tree_oid = self.write_index_tree()?;
        writeln!(self.writer(), "{tree_oid}")?;

        Ok(())
    }

    /// Store one tree per staged directory, children before parents, and
    /// return the root tree's ID. An empty index gives the empty tree.
    pub fn write_index_tree(&self) -> Result<ObjectId> {
        let mut index = self.index();
        index.rehydrate()?;

        let tree_oid = TreeBuilder::build(index.entries()).write(self.database())?;
        tracing::debug!(tree = %tree_oid, entries = index.len(), "wrote index tree");

        Ok(tree_oid)
    }
}
