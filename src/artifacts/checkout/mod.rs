//! Checkout engine
//!
//! Switching the working tree from one commit's tree to another's:
//! - refuse when the index holds changes that are not in HEAD's tree
//! - remove files tracked by the current tree that the target lacks, pruning
//!   directories left empty
//! - write every blob of the target tree, replacing obstacles
//! - replace the index with the target tree's files
//!
//! Moving HEAD afterwards is up to the caller. Failures part-way leave the
//! working tree partially updated; there is no rollback.

pub mod migration;
