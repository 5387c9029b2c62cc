//! Yes/no prompts with per-question defaults
//!
//! Only the first character of the answer matters, compared case-insensitively.
//! Anything that isn't an explicit override of the default (empty line, typo,
//! end of input) resolves to the default.

use crate::error::Result;
use std::io::{BufRead, Write};

/// What an unanswered or unrecognised prompt resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAnswer {
    /// Accept unless the answer starts with `N`
    Yes,
    /// Decline unless the answer starts with `Y`
    No,
}

impl DefaultAnswer {
    /// The bracketed hint shown after the question
    pub fn hint(self) -> &'static str {
        match self {
            DefaultAnswer::Yes => "[Y/y]",
            DefaultAnswer::No => "[N/n]",
        }
    }
}

/// Decide a raw answer against the prompt's default
pub fn resolve(raw: &str, default: DefaultAnswer) -> bool {
    let first = raw.chars().next().map(|c| c.to_ascii_uppercase());
    match default {
        DefaultAnswer::Yes => first != Some('N'),
        DefaultAnswer::No => first == Some('Y'),
    }
}

/// Asks questions on `output` and reads answers from `input`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `question` with the default's hint and resolve the reply
    pub fn ask(&mut self, question: &str, default: DefaultAnswer) -> Result<bool> {
        write!(self.output, "{} {} ", question, default.hint())?;
        self.output.flush()?;

        let mut line = String::new();
        // 0 bytes read means stdin is closed; treat it like an empty answer
        self.input.read_line(&mut line)?;
        Ok(resolve(&line, default))
    }

    /// Write a full line to the prompt's output
    pub fn say(&mut self, line: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
