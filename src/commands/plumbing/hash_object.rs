use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::errors::{IoContext, Result};
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Print the blob ID of `file`, storing the blob when `write` is set.
    pub fn hash_object(&self, file: &Path, write: bool) -> Result<()> {
        let content = std::fs::read(file).at_path(file)?;
        let blob = Blob::new(content);

        let object_id = if write {
            self.database().store(&blob)?
        } else {
            blob.object_id()
        };

        writeln!(self.writer(), "{object_id}")?;

        Ok(())
    }
}
