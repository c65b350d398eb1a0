use crate::areas::database::MIN_PREFIX_LENGTH;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR, PARENT, REF_ALIASES};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};

/// A revision expression identifying a commit.
///
/// Supported forms:
/// - Branch names: `master`, `feature/login`, `HEAD`
/// - Aliases: `@` (resolves to `HEAD`)
/// - Full or abbreviated (at least 4 hex digits) commit IDs, tried when no
///   branch of that name exists
/// - Parent notation: `<revision>^`
/// - Ancestor notation: `<revision>~<n>`, following first parents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// A branch, `HEAD`, or possibly an object ID (decided on resolution)
    Ref(BranchName),
    /// The Nth first-parent ancestor of a revision (e.g. `HEAD~3`)
    Ancestor(Box<Revision>, usize),
    /// The first parent of a revision (e.g. `HEAD^`)
    Parent(Box<Revision>),
}

impl Revision {
    pub fn try_parse(revision: &str) -> Result<Revision> {
        if let Some(captures) = PARENT.captures(revision) {
            let base_revision = Self::try_parse(&captures[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(captures) = ANCESTOR.captures(revision) {
            let generations = captures[2]
                .parse::<usize>()
                .map_err(|_| Error::InvalidRevision(revision.to_string()))?;
            let base_revision = Self::try_parse(&captures[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            let branch_name = BranchName::try_parse(resolved_name)
                .map_err(|_| Error::InvalidRevision(revision.to_string()))?;

            Ok(Revision::Ref(branch_name))
        }
    }

    /// Resolve to a commit ID.
    pub fn resolve(&self, repository: &Repository) -> Result<ObjectId> {
        match self {
            Revision::Ref(name) if name.is_head() => repository.head_commit(),
            Revision::Ref(name) => match repository.refs().read_branch(name)? {
                Some(oid) => Ok(oid),
                None if looks_like_oid(name.as_ref()) => {
                    resolve_object_id(name.as_ref(), repository, Some(ObjectType::Commit))
                }
                None => Err(Error::InvalidRevision(name.to_string())),
            },
            Revision::Parent(base_revision) => {
                let oid = base_revision.resolve(repository)?;
                self.commit_parent(&oid, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = self.commit_parent(&oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    fn commit_parent(&self, oid: &ObjectId, repository: &Repository) -> Result<ObjectId> {
        let commit = repository.database().parse_object_as_commit(oid)?;

        commit
            .parent()
            .cloned()
            .ok_or_else(|| Error::InvalidRevision(self.to_string()))
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::Ref(name) => write!(f, "{name}"),
            Revision::Parent(base) => write!(f, "{base}^"),
            Revision::Ancestor(base, generations) => write!(f, "{base}~{generations}"),
        }
    }
}

/// Resolve a full or abbreviated object ID, optionally requiring a kind.
///
/// An abbreviation matching several objects is narrowed to the expected
/// kind before being reported as ambiguous.
pub fn resolve_object_id(
    text: &str,
    repository: &Repository,
    expected: Option<ObjectType>,
) -> Result<ObjectId> {
    let database = repository.database();

    if text.len() == OBJECT_ID_LENGTH {
        let oid = ObjectId::try_parse(text)?;
        check_kind(&oid, repository, expected)?;
        return Ok(oid);
    }

    if !looks_like_oid(text) {
        return Err(Error::InvalidRevision(text.to_string()));
    }

    let mut candidates = database.find_objects_by_prefix(text)?;
    if candidates.len() > 1
        && let Some(expected) = expected
    {
        candidates.retain(|oid| database.object_type(oid).is_ok_and(|kind| kind == expected));
    }

    match candidates.as_slice() {
        [] => Err(Error::InvalidRevision(text.to_string())),
        [oid] => {
            check_kind(oid, repository, expected)?;
            Ok(oid.clone())
        }
        _ => Err(Error::AmbiguousObjectId {
            prefix: text.to_string(),
            candidates,
        }),
    }
}

fn check_kind(oid: &ObjectId, repository: &Repository, expected: Option<ObjectType>) -> Result<()> {
    let actual = repository.database().object_type(oid)?;

    match expected {
        Some(expected) if expected != actual => Err(Error::UnexpectedObjectKind {
            oid: oid.clone(),
            expected,
            actual,
        }),
        _ => Ok(()),
    }
}

fn looks_like_oid(text: &str) -> bool {
    text.len() >= MIN_PREFIX_LENGTH
        && text.len() <= OBJECT_ID_LENGTH
        && text.chars().all(|c| c.is_ascii_hexdigit())
}
