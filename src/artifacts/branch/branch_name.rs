use crate::artifacts::branch::INVALID_BRANCH_NAME;
use crate::errors::{Error, Result};

/// Prefix of branch refs relative to the repository directory.
pub const REF_PREFIX: &str = "refs/heads/";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// A validated branch name, possibly hierarchical (`feature/login`).
///
/// Rejected: empty names, a leading `.` or `/`, `..`, `/.`, a trailing `/`
/// or `.lock`, `@{`, whitespace and control characters, and any of
/// `* : ? [ \ ~ ^`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.is_empty() || INVALID_BRANCH_NAME.is_match(&name) {
            return Err(Error::InvalidBranchName(name));
        }

        Ok(Self(name))
    }

    /// Parse the target of a symbolic ref (`refs/heads/<name>`).
    pub fn try_parse_ref_path(ref_path: &str) -> Result<Self> {
        let name = ref_path
            .strip_prefix(REF_PREFIX)
            .ok_or_else(|| Error::InvalidBranchName(ref_path.to_string()))?;

        Self::try_parse(name)
    }

    /// `refs/heads/<name>`
    pub fn to_ref_path(&self) -> String {
        format!("{REF_PREFIX}{}", self.0)
    }

    pub fn is_head(&self) -> bool {
        self.0 == HEAD_REF_NAME
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
