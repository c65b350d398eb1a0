use crate::artifacts::objects::object::DecodeError;
use crate::artifacts::objects::object_type::ObjectType;
use serde::{Deserialize, Serialize};

/// Mode of a blob entry.
#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

impl FileMode {
    pub fn from_executable(executable: bool) -> Self {
        if executable {
            FileMode::Executable
        } else {
            FileMode::Regular
        }
    }

    pub fn is_executable(&self) -> bool {
        matches!(self, FileMode::Executable)
    }
}

impl From<FileMode> for String {
    fn from(mode: FileMode) -> Self {
        EntryMode::File(mode).as_str().to_string()
    }
}

impl TryFrom<String> for FileMode {
    type Error = DecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match EntryMode::from_octal_str(&value)? {
            EntryMode::File(mode) => Ok(mode),
            EntryMode::Directory => Err(DecodeError::new("a directory mode is not a file mode")),
        }
    }
}

/// Mode of a tree entry: a file (blob) or a directory (tree).
#[derive(Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Hash)]
pub enum EntryMode {
    File(FileMode),
    Directory,
}

impl EntryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryMode::File(FileMode::Regular) => "100644",
            EntryMode::File(FileMode::Executable) => "100755",
            EntryMode::Directory => "40000",
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            EntryMode::File(FileMode::Regular) => 0o100644,
            EntryMode::File(FileMode::Executable) => 0o100755,
            EntryMode::Directory => 0o40000,
        }
    }

    /// Parse the octal text form used inside tree payloads.
    pub fn from_octal_str(value: &str) -> Result<Self, DecodeError> {
        let mode = u32::from_str_radix(value, 8)
            .map_err(|_| DecodeError::new(format!("invalid entry mode '{value}'")))?;

        EntryMode::try_from(mode)
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, EntryMode::Directory)
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            EntryMode::File(_) => ObjectType::Blob,
            EntryMode::Directory => ObjectType::Tree,
        }
    }
}

impl TryFrom<u32> for EntryMode {
    type Error = DecodeError;

    fn try_from(mode: u32) -> Result<Self, Self::Error> {
        match mode {
            0o100644 => Ok(EntryMode::File(FileMode::Regular)),
            0o100755 => Ok(EntryMode::File(FileMode::Executable)),
            0o40000 => Ok(EntryMode::Directory),
            _ => Err(DecodeError::new(format!("unsupported entry mode {mode:o}"))),
        }
    }
}

impl From<FileMode> for EntryMode {
    fn from(mode: FileMode) -> Self {
        EntryMode::File(mode)
    }
}
