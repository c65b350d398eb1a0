//! Staging index data structures
//!
//! The index is stored as JSON:
//!
//! ```text
//! {
//!   "version": 1,
//!   "entries": {
//!     "a.txt": { "oid": "<40 hex>", "mode": "100644" },
//!     "dir/b.sh": { "oid": "<40 hex>", "mode": "100755" }
//!   }
//! }
//! ```
//!
//! Keys are repository-relative paths with `/` separators, kept in byte
//! order so iteration is deterministic.

pub mod entry_mode;
pub mod index_entry;

use crate::areas::repository::REPOSITORY_DIR;
use std::path::{Component, Path};

/// Index file format version
pub const VERSION: u32 = 1;

/// Convert a relative filesystem path into an index key (`a/b/c.txt`).
pub fn path_key(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Every ancestor directory of an index key, outermost first.
///
/// `a/b/c.txt` yields `["a", "a/b"]`.
pub fn parent_dirs(key: &str) -> Vec<&str> {
    key.match_indices('/')
        .map(|(position, _)| &key[..position])
        .collect()
}

/// Whether `name` may appear as one component of a tracked path.
///
/// Rejects names that would escape the working tree or land inside the
/// repository directory when joined onto a checkout path.
pub fn is_safe_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name != REPOSITORY_DIR
        && !name.contains(['/', '\0'])
}

/// Whether every component of an index key passes `is_safe_component`.
pub fn is_safe_key(key: &str) -> bool {
    key.split('/').all(is_safe_component)
}

/// The last component of an index key.
pub fn basename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
