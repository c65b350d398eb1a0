//! Branch names and revision expressions

pub mod branch_name;
pub mod revision;

use regex::Regex;
use std::sync::LazyLock;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\/\/|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
pub const PARENT_REGEX: &str = r"^(.+)\^$";
pub const ANCESTOR_REGEX: &str = r"^(.+)\~(\d+)$";
pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
};

pub(crate) static INVALID_BRANCH_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(INVALID_BRANCH_NAME_REGEX).expect("invalid branch name regex"));
pub(crate) static PARENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PARENT_REGEX).expect("invalid parent regex"));
pub(crate) static ANCESTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ANCESTOR_REGEX).expect("invalid ancestor regex"));
