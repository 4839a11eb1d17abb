// src/command/mod.rs

//! Command-line handling.
//!
//! - [`tokenizer`] turns a single free-form command string into tokens.
//! - [`ParsedCommand`] is the result: the executable plus its arguments, in
//!   the order they appeared in the source string.

pub mod tokenizer;

use std::fmt;

pub use tokenizer::{parse, ScanState};

/// An executable and the arguments to launch it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    executable: String,
    args: Vec<String>,
}

impl ParsedCommand {
    pub fn new<E: Into<String>>(executable: E, args: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            args,
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.executable, self.args)
    }
}

/// Tokens joined with a single space. Quoting is not reconstructed, so this
/// is for diagnostics only and does not round-trip through [`parse`].
impl fmt::Display for ParsedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.executable)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
