//! Core repository components
//!
//! - `database`: Content-addressed object store for blobs, trees, and commits
//! - `index`: Staging area recording the next snapshot
//! - `refs`: Branches and HEAD
//! - `repository`: The context object tying the areas together
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
