//! Database entry types
//!
//! A database entry is what a tree records for each name: the object ID and
//! the mode that says whether it is a file or a subtree.

pub mod database_entry;
