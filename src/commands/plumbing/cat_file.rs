use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::resolve_object_id;
use crate::artifacts::objects::object::ObjectBox;
use crate::errors::Result;
use std::io::Write;

/// What `cat-file` prints about an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatFileMode {
    /// The object's kind (`-t`)
    Type,
    /// The object's content (`-p`)
    Pretty,
}

impl Repository {
    pub fn cat_file(&self, object: &str, mode: CatFileMode) -> Result<()> {
        let object_id = resolve_object_id(object, self, None)?;

        match mode {
            CatFileMode::Type => {
                let object_type = self.database().object_type(&object_id)?;
                writeln!(self.writer(), "{object_type}")?;
            }
            CatFileMode::Pretty => match self.database().parse_object(&object_id)? {
                // blob content goes out untouched, it may not be text
                ObjectBox::Blob(blob) => self.writer().write_all(blob.content())?,
                object => {
                    let display = object.display();
                    if display.ends_with('\n') {
                        write!(self.writer(), "{display}")?;
                    } else {
                        writeln!(self.writer(), "{display}")?;
                    }
                }
            },
        }

        Ok(())
    }
}
