//! Commit object
//!
//! Commits record a snapshot of the repository at a point in time:
//! - A tree object ID (the root directory snapshot)
//! - Zero or more parent commit IDs (zero for a root commit, two or more
//!   for a merge)
//! - Author and committer identity with timestamps
//! - The commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{DecodeError, Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::io::BufRead;

pub const AUTHOR_NAME_VAR: &str = "CAIRN_AUTHOR_NAME";
pub const AUTHOR_EMAIL_VAR: &str = "CAIRN_AUTHOR_EMAIL";
pub const AUTHOR_DATE_VAR: &str = "CAIRN_AUTHOR_DATE";

const DEFAULT_AUTHOR_NAME: &str = "cairn user";
const DEFAULT_AUTHOR_EMAIL: &str = "user@cairn.local";

/// Author or committer information
///
/// Contains name, email, and timestamp with timezone information.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    /// Create a new author stamped with the current local time.
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(name: String, email: String, timestamp: DateTime<FixedOffset>) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Parse a `Name <email>` identity, stamped with the current time.
    pub fn parse_identity(identity: &str) -> Result<Self, DecodeError> {
        let (name, email) = split_identity(identity)?;
        Ok(Author::new(name, email))
    }

    /// Load the author identity from the environment.
    ///
    /// Reads `CAIRN_AUTHOR_NAME`, `CAIRN_AUTHOR_EMAIL`, and optionally
    /// `CAIRN_AUTHOR_DATE` (RFC 2822 or `%Y-%m-%d %H:%M:%S %z`). Missing
    /// name or email fall back to a default identity; a missing or
    /// unparsable date means "now".
    pub fn load_from_env() -> Self {
        let name = std::env::var(AUTHOR_NAME_VAR).unwrap_or_else(|_| DEFAULT_AUTHOR_NAME.into());
        let email =
            std::env::var(AUTHOR_EMAIL_VAR).unwrap_or_else(|_| DEFAULT_AUTHOR_EMAIL.into());

        match Self::timestamp_from_env() {
            Some(timestamp) => Author::new_with_timestamp(name, email, timestamp),
            None => Author::new(name, email),
        }
    }

    /// The timestamp configured through `CAIRN_AUTHOR_DATE`, if any.
    pub fn timestamp_from_env() -> Option<DateTime<FixedOffset>> {
        let date = std::env::var(AUTHOR_DATE_VAR).ok()?;

        let parsed = DateTime::parse_from_rfc2822(&date)
            .or_else(|_| DateTime::parse_from_str(&date, "%Y-%m-%d %H:%M:%S %z"));
        if parsed.is_err() {
            tracing::warn!(date = %date, "ignoring unparsable {AUTHOR_DATE_VAR}");
        }
        parsed.ok()
    }

    /// Replace the timestamp, keeping the identity.
    pub fn with_timestamp(self, timestamp: DateTime<FixedOffset>) -> Self {
        Author { timestamp, ..self }
    }

    /// "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// "Name <email> timestamp timezone", the form stored in the object.
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Timestamp like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }
}

fn split_identity(identity: &str) -> Result<(String, String), DecodeError> {
    let email_start = identity
        .find('<')
        .ok_or_else(|| DecodeError::new(format!("identity '{identity}' is missing '<'")))?;
    let email_end = identity
        .rfind('>')
        .filter(|end| *end > email_start)
        .ok_or_else(|| DecodeError::new(format!("identity '{identity}' is missing '>'")))?;

    let name = identity[..email_start].trim().to_string();
    let email = identity[email_start + 1..email_end].to_string();

    Ok((name, email))
}

impl TryFrom<&str> for Author {
    type Error = DecodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // "name <email> timestamp timezone", split from the right
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(DecodeError::new(format!("invalid author line '{value}'")));
        }

        let timezone = parts[0];
        let seconds = parts[1]
            .parse::<i64>()
            .map_err(|_| DecodeError::new(format!("invalid timestamp '{}'", parts[1])))?;
        let (name, email) = split_identity(parts[2])?;

        let offset = DateTime::parse_from_str(&format!("1970-01-01 00:00:00 {timezone}"), "%Y-%m-%d %H:%M:%S %z")
            .map_err(|_| DecodeError::new(format!("invalid timezone '{timezone}'")))?
            .offset()
            .to_owned();
        let timestamp = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| DecodeError::new(format!("timestamp {seconds} out of range")))?
            .with_timezone(&offset);

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

/// A snapshot of the tree plus its place in history.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs, first parent first
    parents: Vec<ObjectId>,
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    /// Create a new commit; the author also acts as committer.
    pub fn new(parents: Vec<ObjectId>, tree_oid: ObjectId, author: Author, message: String) -> Self {
        Commit {
            parents,
            tree_oid,
            committer: author.clone(),
            author,
            message,
        }
    }

    /// First line of the message, used by one-line displays.
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.author.timestamp()
    }
}

impl Packable for Commit {
    fn payload(&self) -> Bytes {
        self.display().into_bytes().into()
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> Result<Self, DecodeError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let (headers, message) = content
            .split_once("\n\n")
            .ok_or_else(|| DecodeError::new("commit is missing the message separator"))?;
        let mut lines = headers.lines();

        let tree_oid = lines
            .next()
            .and_then(|line| line.strip_prefix("tree "))
            .ok_or_else(|| DecodeError::new("commit is missing its tree line"))?;
        let tree_oid = parse_oid(tree_oid)?;

        // zero, one, or many parents
        let mut parents = Vec::new();
        let mut next_line = lines.next();
        while let Some(parent) = next_line.and_then(|line| line.strip_prefix("parent ")) {
            parents.push(parse_oid(parent)?);
            next_line = lines.next();
        }

        let author = next_line
            .and_then(|line| line.strip_prefix("author "))
            .ok_or_else(|| DecodeError::new("commit is missing its author line"))?;
        let author = Author::try_from(author)?;

        let committer = lines
            .next()
            .and_then(|line| line.strip_prefix("committer "))
            .ok_or_else(|| DecodeError::new("commit is missing its committer line"))?;
        let committer = Author::try_from(committer)?;

        Ok(Commit {
            parents,
            tree_oid,
            author,
            committer,
            message: message.to_string(),
        })
    }
}

fn parse_oid(hex: &str) -> Result<ObjectId, DecodeError> {
    ObjectId::try_parse(hex).map_err(|error| DecodeError::new(error.to_string()))
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        for parent in &self.parents {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}
