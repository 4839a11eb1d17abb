// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::command::ParsedCommand;

/// Top-level configuration file.
///
/// ```toml
/// [run]
/// dir = "$HOME/projects/api"
/// log = "/tmp/api.log"
/// cmd = "cargo run --bin api -- --port 8080"
/// ```
///
/// Every field is optional here; the command line can supply or override
/// any of them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub run: RawRunSpec,
}

/// Run inputs before validation and environment expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRunSpec {
    /// Working directory for the process.
    pub dir: Option<String>,
    /// File the JSON log lines are written to.
    pub log: Option<String>,
    /// Full command line, tokenized by `command::parse`.
    pub cmd: Option<String>,
}

impl RawRunSpec {
    pub fn new(dir: Option<String>, log: Option<String>, cmd: Option<String>) -> Self {
        Self { dir, log, cmd }
    }

    /// Fields set in `over` replace the ones in `self`.
    pub fn overlay(self, over: RawRunSpec) -> RawRunSpec {
        RawRunSpec {
            dir: over.dir.or(self.dir),
            log: over.log.or(self.log),
            cmd: over.cmd.or(self.cmd),
        }
    }
}

/// Validated, expanded run inputs.
///
/// Constructed via `TryFrom<RawRunSpec>` (see `config::validate`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    dir: PathBuf,
    log: PathBuf,
    name: String,
    command: ParsedCommand,
}

impl RunSpec {
    pub(crate) fn new_unchecked(
        dir: PathBuf,
        log: PathBuf,
        name: String,
        command: ParsedCommand,
    ) -> Self {
        Self {
            dir,
            log,
            name,
            command,
        }
    }

    /// Working directory. Empty means "inherit ours".
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn log(&self) -> &Path {
        &self.log
    }

    /// The expanded command string, recorded as `Name` in every log line.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn command(&self) -> &ParsedCommand {
        &self.command
    }
}
