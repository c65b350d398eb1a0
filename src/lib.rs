//! cairn: a minimal content-addressable version control system.
//!
//! Files are stored as zlib-compressed, SHA-1 addressed objects under
//! `.cairn/objects`; directories become tree objects and snapshots become
//! commits. Branches and HEAD live under `.cairn` as plain text refs.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
