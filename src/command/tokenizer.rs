// src/command/tokenizer.rs

//! Split a command string into an executable and its arguments.
//!
//! Rules:
//! - tokens are separated by runs of spaces and horizontal tabs
//! - `"..."` and `'...'` delimit a quoted segment; whitespace inside it is
//!   kept verbatim and the other quote style is an ordinary character
//! - a closing quote always completes a token, even an empty one (`""`)
//! - a quote character also completes any unquoted run it touches, so
//!   `ab"cd"ef` is three tokens: `ab`, `cd`, `ef`
//! - there is no escaping of any kind
//!
//! The scan is a fold of [`step`] over the characters, starting from
//! [`ScanState::Idle`], followed by [`finish`].

use tracing::trace;

use crate::command::ParsedCommand;
use crate::errors::{Result, RunlogError};

/// Scanner state between two characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// No partial token pending.
    Idle,
    /// Inside a bare run of non-whitespace characters.
    Unquoted(String),
    /// Inside a quoted segment opened by `quote`.
    Quoted { buffer: String, quote: char },
}

fn is_delimiter(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

fn is_quote(ch: char) -> bool {
    ch == '"' || ch == '\''
}

/// Advance the scanner by one character, pushing any token it completes.
pub fn step(state: ScanState, ch: char, tokens: &mut Vec<String>) -> ScanState {
    match state {
        ScanState::Idle => {
            if is_quote(ch) {
                ScanState::Quoted {
                    buffer: String::new(),
                    quote: ch,
                }
            } else if is_delimiter(ch) {
                ScanState::Idle
            } else {
                ScanState::Unquoted(ch.to_string())
            }
        }
        ScanState::Unquoted(mut buffer) => {
            if is_delimiter(ch) {
                tokens.push(buffer);
                ScanState::Idle
            } else if is_quote(ch) {
                tokens.push(buffer);
                ScanState::Quoted {
                    buffer: String::new(),
                    quote: ch,
                }
            } else {
                buffer.push(ch);
                ScanState::Unquoted(buffer)
            }
        }
        ScanState::Quoted { mut buffer, quote } => {
            if ch == quote {
                tokens.push(buffer);
                ScanState::Idle
            } else {
                buffer.push(ch);
                ScanState::Quoted { buffer, quote }
            }
        }
    }
}

/// Close out the scan at end of input.
///
/// An open quoted segment is an error; a pending unquoted run becomes the
/// last token.
pub fn finish(state: ScanState, tokens: &mut Vec<String>, command: &str) -> Result<()> {
    match state {
        ScanState::Idle => Ok(()),
        ScanState::Unquoted(buffer) => {
            tokens.push(buffer);
            Ok(())
        }
        ScanState::Quoted { .. } => Err(RunlogError::UnterminatedQuote {
            command: command.to_string(),
        }),
    }
}

/// Parse `command` into an executable and its arguments.
pub fn parse(command: &str) -> Result<ParsedCommand> {
    let mut tokens = Vec::new();
    let state = command
        .chars()
        .fold(ScanState::Idle, |state, ch| step(state, ch, &mut tokens));
    finish(state, &mut tokens, command)?;

    trace!(?tokens, "tokenized command line");

    let mut tokens = tokens.into_iter();
    let executable = tokens.next().ok_or(RunlogError::EmptyCommand)?;
    Ok(ParsedCommand::new(executable, tokens.collect()))
}
