//! Operator console.
//!
//! [`Console`] is the only place the interactive stages touch I/O. It renders
//! lines and prompts to any [`Write`] and reads answers from any [`BufRead`],
//! so the selection logic can be driven by canned input in tests:
//!
//! ```rust
//! use std::io::Cursor;
//! use smsfilter::console::Console;
//!
//! # fn main() -> smsfilter::Result<()> {
//! let mut console = Console::new(Cursor::new("2\n"), Vec::new());
//! let answer = console.ask("Pick one: ")?;
//! assert_eq!(answer.as_deref(), Some("2"));
//! # Ok(())
//! # }
//! ```

use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::error::Result;

/// Line-oriented prompt I/O.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one line.
    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Writes `title` followed by a 1-indexed enumeration of `items`.
    pub fn list<T: Display>(&mut self, title: &str, items: &[T]) -> Result<()> {
        writeln!(self.output, "{title}")?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, item)?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Writes `prompt` without a newline and reads one answer.
    ///
    /// The trailing line terminator is stripped. Returns `None` once the
    /// input is exhausted.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Everything written so far, for in-memory consoles.
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}
