//! Terminal handling for the command line front end
//!
//! Decides whether output is paged or coloured, and adapts the pager to
//! `std::io::Write` so a report can go to either destination.

use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Set (to any value) to print straight to stdout even on a terminal
pub const NO_PAGER_ENV: &str = "NO_PAGER";

/// `Write` adapter over a minus pager.
///
/// The pager takes `&str`, so bytes are forwarded once they form complete
/// UTF-8; a character split across two writes is held back until its
/// remaining bytes arrive.
pub struct PagerWriter {
    pager: Pager,
    partial: Vec<u8>,
}

impl PagerWriter {
    pub fn new(pager: Pager) -> Self {
        PagerWriter {
            pager,
            partial: Vec::new(),
        }
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.partial.extend_from_slice(buf);

        let complete = match std::str::from_utf8(&self.partial) {
            Ok(text) => text.len(),
            Err(error) if error.error_len().is_none() => error.valid_up_to(),
            Err(error) => {
                self.partial.clear();
                return Err(io::Error::new(io::ErrorKind::InvalidData, error));
            }
        };

        let rest = self.partial.split_off(complete);
        let text = String::from_utf8(std::mem::replace(&mut self.partial, rest))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.partial.is_empty() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "incomplete UTF-8 sequence at end of output",
            ))
        }
    }
}

/// Whether stdout is an interactive terminal
pub fn stdout_is_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Page only on a terminal, and never when `NO_PAGER` is set
pub fn should_page() -> bool {
    std::env::var_os(NO_PAGER_ENV).is_none() && stdout_is_terminal()
}
