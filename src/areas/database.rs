//! Object database
//!
//! Objects are zlib-compressed and stored under a two-level fan-out
//! (`objects/ab/cdef…`). Writes go to a temporary file in the target
//! directory and are renamed into place, so readers never observe a partial
//! object. Reads verify the header and re-hash the content.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{self, Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, IoContext, Result};
use bytes::Bytes;
use fake::rand;
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Shortest abbreviated digest accepted from user input.
pub const MIN_PREFIX_LENGTH: usize = 4;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store a typed object and return its digest.
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        self.store_raw(object.object_type(), &object.payload())
    }

    /// Store `payload` framed as `object_type`. Storing an existing digest
    /// is a no-op.
    pub fn store_raw(&self, object_type: ObjectType, payload: &[u8]) -> Result<ObjectId> {
        let framed = object::frame(object_type, payload);
        let oid = object::hash_framed(&framed);
        let object_path = self.path.join(oid.to_path());

        if object_path.exists() {
            tracing::trace!(%oid, "object already stored");
            return Ok(oid);
        }

        self.write_object(&object_path, &framed)?;
        tracing::debug!(%oid, kind = %object_type, size = payload.len(), "stored object");

        Ok(oid)
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Read an object back as its kind and payload.
    pub fn load(&self, object_id: &ObjectId) -> Result<(ObjectType, Bytes)> {
        let object_path = self.path.join(object_id.to_path());

        let compressed = match std::fs::read(&object_path) {
            Ok(compressed) => compressed,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ObjectNotFound(object_id.clone()));
            }
            Err(error) => return Err(Error::io(object_path, error)),
        };

        let corrupt = |reason: String| Error::CorruptObject {
            oid: object_id.clone(),
            reason,
        };

        let framed = Self::decompress(&compressed).map_err(|error| corrupt(error.to_string()))?;
        let actual = object::hash_framed(&framed);
        if &actual != object_id {
            return Err(corrupt(format!("content hashes to {actual}")));
        }

        let (object_type, payload) =
            object::unframe(&framed).map_err(|error| corrupt(error.to_string()))?;
        let payload = Bytes::copy_from_slice(payload);

        Ok((object_type, payload))
    }

    pub fn object_type(&self, object_id: &ObjectId) -> Result<ObjectType> {
        let (object_type, _) = self.load(object_id)?;
        Ok(object_type)
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> Result<ObjectBox> {
        let (object_type, payload) = self.load(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(decode(object_id, payload)?))),
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(decode(object_id, payload)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(decode(object_id, payload)?))),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> Result<Blob> {
        self.parse_object_as(object_id, ObjectType::Blob)
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> Result<Tree> {
        self.parse_object_as(object_id, ObjectType::Tree)
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> Result<Commit> {
        self.parse_object_as(object_id, ObjectType::Commit)
    }

    fn parse_object_as<T: Unpackable>(&self, object_id: &ObjectId, expected: ObjectType) -> Result<T> {
        let (actual, payload) = self.load(object_id)?;

        if actual != expected {
            return Err(Error::UnexpectedObjectKind {
                oid: object_id.clone(),
                expected,
                actual,
            });
        }

        decode(object_id, payload)
    }

    /// Flatten a tree into `path -> file entry`, with `/`-separated paths.
    pub fn flatten_tree(&self, tree_oid: &ObjectId) -> Result<BTreeMap<String, DatabaseEntry>> {
        let mut files = BTreeMap::new();
        self.collect_tree_files(tree_oid, None, &mut files)?;
        Ok(files)
    }

    fn collect_tree_files(
        &self,
        tree_oid: &ObjectId,
        prefix: Option<&str>,
        files: &mut BTreeMap<String, DatabaseEntry>,
    ) -> Result<()> {
        let tree = self.parse_object_as_tree(tree_oid)?;

        for (name, entry) in tree.into_entries() {
            let path = match prefix {
                Some(prefix) => format!("{prefix}/{name}"),
                None => name,
            };

            if entry.is_tree() {
                self.collect_tree_files(&entry.oid, Some(&path), files)?;
            } else {
                files.insert(path, entry);
            }
        }

        Ok(())
    }

    /// Find every stored object whose digest starts with `prefix`.
    ///
    /// Only the fan-out directory named by the first two characters is
    /// scanned; callers enforce the minimum prefix length.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        if prefix.len() < 2 {
            return Ok(Vec::new());
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);
        if !dir_path.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        for entry in std::fs::read_dir(&dir_path).at_path(&dir_path)? {
            let entry = entry.at_path(&dir_path)?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(file_prefix) {
                // temp files and strays fail to parse and are skipped
                if let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}")) {
                    matches.push(oid);
                }
            }
        }
        matches.sort();

        Ok(matches)
    }

    fn write_object(&self, object_path: &Path, framed: &[u8]) -> Result<()> {
        let object_dir = object_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.path.to_path_buf());
        std::fs::create_dir_all(&object_dir).at_path(&object_dir)?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());
        let compressed = Self::compress(framed).at_path(&temp_object_path)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_object_path)
            .at_path(&temp_object_path)?;
        let written = file.write_all(&compressed).at_path(&temp_object_path);
        drop(file);

        // rename the temp file to the object file to make it atomic
        let stored = written.and_then(|()| {
            std::fs::rename(&temp_object_path, object_path)
                .map_err(|error| Error::io(object_path, error))
        });
        if stored.is_err() {
            let _ = std::fs::remove_file(&temp_object_path);
        }

        stored
    }

    fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed)?;

        Ok(decompressed)
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Location of an object file, whether or not it exists.
    pub fn object_file(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }
}

fn decode<T: Unpackable>(object_id: &ObjectId, payload: Bytes) -> Result<T> {
    T::deserialize(Cursor::new(payload)).map_err(|error| Error::CorruptObject {
        oid: object_id.clone(),
        reason: error.to_string(),
    })
}
