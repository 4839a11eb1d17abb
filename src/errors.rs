// src/errors.rs

//! Crate-wide error type.
//!
//! Tokenizer, log-writer, validation and process failures get their own
//! variants so callers can match on them. Filesystem errors that carry an
//! `anyhow` context (reading the config file, creating the log file) arrive
//! as `Other`.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunlogError {
    #[error("empty command line")]
    EmptyCommand,

    #[error("unclosed quote in command line: {command}")]
    UnterminatedQuote { command: String },

    #[error("could not prepare log line: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("could not write log line: {0}")]
    Write(#[source] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("failed to spawn '{executable}': {source}")]
    Spawn {
        executable: String,
        #[source]
        source: io::Error,
    },

    #[error("process exited with status {code}")]
    ProcessFailed { code: i32 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RunlogError {
    /// Exit code the binary should terminate with for this error.
    ///
    /// A child that exited non-zero hands its own code through; everything
    /// else is a plain `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunlogError::ProcessFailed { code } if *code > 0 => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, RunlogError>;
