//! Working tree status inspection
//!
//! Compares HEAD's tree against the index (staged changes) and the index
//! against the working tree (unstaged changes), and lists untracked paths.
//!
//! ## Components
//!
//! - `file_change`: change kinds and their display forms
//! - `status_info`: the comparison itself

pub mod file_change;
pub mod status_info;
