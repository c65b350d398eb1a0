//! Repository data structures and algorithms
//!
//! - `branch`: Branch names and revision parsing
//! - `checkout`: Moving the working tree between snapshots
//! - `core`: Shared terminal output helpers (pager wrapper)
//! - `database`: Database entry types
//! - `index`: Staging index entries and file modes
//! - `log`: Commit history traversal
//! - `objects`: Object types (blob, tree, commit) and the tree builder
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod database;
pub mod index;
pub mod log;
pub mod objects;
pub mod status;
