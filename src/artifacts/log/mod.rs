//! Commit history traversal
//!
//! `rev_list` walks first parents from a starting commit back to the root.
//! Merge commits are followed through their first parent only.

pub mod rev_list;
