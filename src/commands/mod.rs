//! Command implementations
//!
//! Every command is a method on `Repository`, split in two groups:
//!
//! - `plumbing`: Low-level object commands (hash-object, cat-file, write-tree,
//!   commit-tree, ls-tree)
//! - `porcelain`: The user-facing workflow (init, add, commit, log, etc.)

pub mod plumbing;
pub mod porcelain;
