//! Plumbing commands (low-level object operations)
//!
//! Plumbing commands give direct access to the object store and the
//! staging index. They are the building blocks the porcelain commands
//! compose.
//!
//! ## Commands
//!
//! - `hash-object`: Compute a blob's object ID and optionally store it
//! - `cat-file`: Print an object's type or content
//! - `write-tree`: Snapshot the index as tree objects
//! - `commit-tree`: Create a commit object for a tree (the commit writer)
//! - `ls-tree`: List the contents of a tree object

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_tree;
pub mod write_tree;
