//! Porcelain commands (user-facing version control workflows)
//!
//! Porcelain commands compose the object store, index, refs, and workspace
//! into the everyday workflow.
//!
//! ## Commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `rm`: Unstage files, optionally deleting them
//! - `commit`: Create a new commit from the index
//! - `status`: Show working tree status
//! - `log`: Show commit history
//! - `branch`: Create, list, or delete branches
//! - `checkout`: Switch branches or detach HEAD at a commit

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod rm;
pub mod status;
