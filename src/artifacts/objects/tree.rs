//! Tree object
//!
//! Trees represent one directory level. Each entry names a file (blob) or a
//! subdirectory (tree) together with its mode and digest.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries are serialized in name order where directory names compare as if
//! they ended in `/`, so two directories with the same content always hash
//! the same.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::is_safe_component;
use crate::artifacts::objects::object::{DecodeError, Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::BufRead;

/// One directory snapshot, entries unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, DatabaseEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry called `name`.
    pub fn insert(&mut self, name: impl Into<String>, entry: DatabaseEntry) {
        self.entries.insert(name.into(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&DatabaseEntry> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &DatabaseEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, DatabaseEntry)> {
        self.entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in serialization order.
    fn ordered_entries(&self) -> Vec<(&String, &DatabaseEntry)> {
        let mut entries = self.entries.iter().collect::<Vec<_>>();
        entries.sort_by_cached_key(|(name, entry)| sort_key(name, entry));
        entries
    }
}

fn sort_key(name: &str, entry: &DatabaseEntry) -> Vec<u8> {
    let mut key = name.as_bytes().to_vec();
    if entry.is_tree() {
        key.push(b'/');
    }
    key
}

impl Packable for Tree {
    fn payload(&self) -> Bytes {
        let mut content = Vec::new();

        for (name, entry) in self.ordered_entries() {
            content.extend_from_slice(format!("{:o} {}", entry.mode.as_u32(), name).as_bytes());
            content.push(0);
            content.extend_from_slice(&raw_oid(&entry.oid));
        }

        content.into()
    }
}

fn raw_oid(oid: &ObjectId) -> Vec<u8> {
    let mut raw = Vec::with_capacity(20);
    // the id was validated as 40 hex digits on construction
    if let Err(error) = oid.write_h40_to(&mut raw) {
        tracing::error!(%oid, %error, "object id failed to encode");
    }
    raw
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead) -> Result<Self, DecodeError> {
        let mut entries = BTreeMap::new();

        // scratch buffers reused across entries
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // "mode " (space-delimited)
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break;
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(DecodeError::new("unexpected end of tree in entry mode"));
            }
            let mode = EntryMode::from_octal_str(std::str::from_utf8(&mode_bytes)?)?;

            // "name\0"
            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(DecodeError::new("unexpected end of tree in entry name"));
            }
            let name = std::str::from_utf8(&name_bytes)?.to_owned();
            if !is_safe_component(&name) {
                return Err(DecodeError::new(format!("invalid tree entry name '{name}'")));
            }

            let oid = ObjectId::read_h40_from(&mut reader)
                .map_err(|_| DecodeError::new("unexpected end of tree in object id"))?;

            if entries.insert(name.clone(), DatabaseEntry::new(oid, mode)).is_some() {
                return Err(DecodeError::new(format!("duplicate tree entry '{name}'")));
            }
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.ordered_entries()
            .into_iter()
            .map(|(name, entry)| {
                format!(
                    "{:0>6} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.mode.object_type(),
                    entry.oid,
                    name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
