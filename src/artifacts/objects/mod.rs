//! Stored object kinds and their encodings
//!
//! Every piece of content is an object identified by the SHA-1 of its framed
//! serialization `<kind> <size>\0<payload>`:
//!
//! - **Blob**: file content (raw bytes)
//! - **Tree**: one directory level (names, modes, and object IDs)
//! - **Commit**: a root tree plus parents, author, committer, and message
//!
//! `tree_builder` turns the flat staging index into nested trees.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;
pub mod tree_builder;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
