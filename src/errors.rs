//! Error types for repository operations.
//!
//! Every failure the core can report is a distinct variant so callers can
//! match on it. I/O failures always carry the path that was being touched.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::PathBuf;

/// Errors raised by the object store, index, refs, and checkout engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No object is stored under this digest.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// The stored bytes could not be inflated, parsed, or failed the re-hash check.
    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: ObjectId, reason: String },

    /// A typed read found a different kind of object.
    #[error("object {oid} is a {actual}, not a {expected}")]
    UnexpectedObjectKind {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("short object id {prefix} is ambiguous ({} candidates)", candidates.len())]
    AmbiguousObjectId {
        prefix: String,
        candidates: Vec<ObjectId>,
    },

    #[error("a branch named '{0}' already exists")]
    BranchExists(String),

    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    #[error("cannot delete branch '{0}' checked out at HEAD")]
    CannotDeleteCurrentBranch(String),

    #[error("'{0}' is not a valid branch name")]
    InvalidBranchName(String),

    #[error("not a valid revision: '{0}'")]
    InvalidRevision(String),

    /// The new tree is identical to the first parent's tree.
    #[error("nothing to commit, working tree clean")]
    EmptyCommit,

    /// HEAD does not resolve to any commit yet.
    #[error("HEAD does not point to a commit ({0})")]
    DanglingHead(String),

    #[error("your staged changes would be lost by checkout; commit them first")]
    UncommittedChanges,

    #[error("untracked working tree file '{}' would be overwritten by checkout", .0.display())]
    UntrackedOverwritten(PathBuf),

    #[error("not a cairn repository (or any parent up to /): {}", .0.display())]
    NotARepository(PathBuf),

    #[error("repository already exists in {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("pathspec '{}' did not match any files", .0.display())]
    PathNotFound(PathBuf),

    /// Checkout failed while writing into the working directory. The
    /// workspace is left partially updated.
    #[error("failed to update {}: {source}", path.display())]
    WorkspaceWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to read or write index {}: {source}", path.display())]
    Index {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing command output failed (closed pipe, pager error).
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for repository operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Attach a path to a raw `std::io::Result`.
pub(crate) trait IoContext<T> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| Error::io(path, source))
    }
}
