//! Index entry representation
//!
//! Each staged path maps to the blob holding its content and the file mode
//! captured when it was added.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct IndexEntry {
    /// Digest of the staged blob
    pub oid: ObjectId,
    #[serde(default)]
    pub mode: FileMode,
}

impl IndexEntry {
    /// The tree entry this index entry becomes in a snapshot.
    pub fn to_database_entry(&self) -> DatabaseEntry {
        DatabaseEntry::new(self.oid.clone(), EntryMode::File(self.mode))
    }

    /// The index entry for a tree entry, or `None` for a directory.
    pub fn from_database_entry(entry: &DatabaseEntry) -> Option<Self> {
        match entry.mode {
            EntryMode::File(mode) => Some(IndexEntry::new(entry.oid.clone(), mode)),
            EntryMode::Directory => None,
        }
    }

    /// Whether this entry and a tree entry describe the same file.
    pub fn matches(&self, entry: &DatabaseEntry) -> bool {
        self.oid == entry.oid && EntryMode::File(self.mode) == entry.mode
    }
}
