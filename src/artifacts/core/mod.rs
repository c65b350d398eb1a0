//! Terminal output helpers
//!
//! Long output (`log`) goes through the `minus` pager when stdout is an
//! interactive terminal.

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Setting this variable, to anything, disables the pager.
pub const NO_PAGER_VAR: &str = "NO_PAGER";

/// Whether output should be paged: stdout is a terminal and `NO_PAGER` is
/// unset.
pub fn should_page() -> bool {
    std::env::var_os(NO_PAGER_VAR).is_none() && io::stdout().is_terminal()
}

/// Adapts the `minus` pager to `std::io::Write`, so it can stand in for
/// stdout as a repository's writer.
///
/// ```ignore
/// let pager = Pager::new();
/// let writer = PagerWriter::new(pager.clone());
/// let repository = Repository::discover(&pwd, Box::new(writer))?;
/// repository.log(&options)?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
