use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, IoContext, Result};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Name of the repository directory inside the working tree.
pub const REPOSITORY_DIR: &str = ".cairn";

/// Branch HEAD is attached to after `init`.
pub const DEFAULT_BRANCH: &str = "master";

/// One repository: its working tree, object database, index, and refs,
/// plus the writer that commands print to.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the repository whose working tree is `path`. Nothing is read
    /// until a command asks for it.
    pub fn new(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let path = path.canonicalize().at_path(path)?;
        let repository_path = path.join(REPOSITORY_DIR);

        let index = Index::new(repository_path.join("index").into_boxed_path());
        let database = Database::new(repository_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(repository_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    /// Walk up from `start` to the nearest directory containing `.cairn`.
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let start = start.canonicalize().at_path(start)?;

        let root = start
            .ancestors()
            .find(|candidate| candidate.join(REPOSITORY_DIR).is_dir())
            .ok_or_else(|| Error::NotARepository(start.clone()))?;
        tracing::debug!(root = %root.display(), "discovered repository");

        Self::new(root, writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `.cairn` directory.
    pub fn repository_path(&self) -> PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn writer(&self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// The commit HEAD resolves to. `DanglingHead` before the first commit,
    /// or when HEAD names a digest missing from the database.
    pub fn head_commit(&self) -> Result<ObjectId> {
        let oid = self.refs.head_commit()?;
        if !self.database.exists(&oid) {
            return Err(Error::DanglingHead(format!("HEAD points at missing object {oid}")));
        }

        Ok(oid)
    }

    /// Path relative to the working tree root, for user-supplied paths.
    pub fn relative_path(&self, path: &Path) -> Result<PathBuf> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            let current_dir = std::env::current_dir().at_path(path)?;
            current_dir.canonicalize().at_path(&current_dir)?.join(path)
        };

        // the target may not exist yet, so normalize lexically
        let mut normalized = PathBuf::new();
        for component in absolute.components() {
            match component {
                std::path::Component::ParentDir => {
                    normalized.pop();
                }
                std::path::Component::CurDir => {}
                other => normalized.push(other),
            }
        }

        normalized
            .strip_prefix(&self.path)
            .map(Path::to_path_buf)
            .map_err(|_| Error::PathNotFound(path.to_path_buf()))
    }
}
