use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

/// A payload that could not be decoded into an object.
///
/// The database turns this into a `CorruptObject` error once it knows which
/// digest was being read.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct DecodeError(String);

impl DecodeError {
    pub fn new(reason: impl Into<String>) -> Self {
        DecodeError(reason.into())
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(error: std::io::Error) -> Self {
        DecodeError(error.to_string())
    }
}

impl From<std::string::FromUtf8Error> for DecodeError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        DecodeError(error.to_string())
    }
}

impl From<std::str::Utf8Error> for DecodeError {
    fn from(error: std::str::Utf8Error) -> Self {
        DecodeError(error.to_string())
    }
}

pub trait Packable {
    /// Serialize the object body, without the `<kind> <len>\0` header.
    fn payload(&self) -> Bytes;
}

pub trait Unpackable {
    /// Decode an object body. The header has already been consumed.
    fn deserialize(reader: impl BufRead) -> Result<Self, DecodeError>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    /// Canonical framed form: `<kind> <payload_length>\0<payload>`.
    fn serialize(&self) -> Bytes {
        frame(self.object_type(), &self.payload())
    }

    fn object_id(&self) -> ObjectId {
        hash_framed(&self.serialize())
    }

    fn object_path(&self) -> PathBuf {
        self.object_id().to_path()
    }
}

/// Prefix `payload` with the header for `object_type`.
pub fn frame(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), payload.len());

    let mut framed = Vec::with_capacity(header.len() + payload.len());
    framed.extend_from_slice(header.as_bytes());
    framed.extend_from_slice(payload);

    Bytes::from(framed)
}

/// SHA-1 of an already framed object.
pub fn hash_framed(framed: &[u8]) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(framed);

    ObjectId::from_raw(&hasher.finalize())
}

/// Split a framed object into its kind and payload, checking that the
/// declared length matches.
pub fn unframe(framed: &[u8]) -> Result<(ObjectType, &[u8]), DecodeError> {
    let space = framed
        .iter()
        .position(|byte| *byte == b' ')
        .ok_or_else(|| DecodeError::new("missing object type in header"))?;
    let nul = framed
        .iter()
        .position(|byte| *byte == b'\0')
        .filter(|nul| *nul > space)
        .ok_or_else(|| DecodeError::new("missing object size in header"))?;

    let object_type = ObjectType::try_from(std::str::from_utf8(&framed[..space])?)?;
    let declared_size = std::str::from_utf8(&framed[space + 1..nul])?
        .parse::<usize>()
        .map_err(|_| DecodeError::new("invalid object size in header"))?;

    let payload = &framed[nul + 1..];
    if payload.len() != declared_size {
        return Err(DecodeError::new(format!(
            "declared size {declared_size} but payload has {} bytes",
            payload.len()
        )));
    }

    Ok((object_type, payload))
}

pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(_) => ObjectType::Blob,
            ObjectBox::Tree(_) => ObjectType::Tree,
            ObjectBox::Commit(_) => ObjectType::Commit,
        }
    }

    pub fn display(&self) -> String {
        match self {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Tree(tree) => tree.display(),
            ObjectBox::Commit(commit) => commit.display(),
        }
    }
}
