// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::RawRunSpec;

/// Command-line arguments for `runlog`.
///
/// The three positionals may be omitted when `--config` supplies them.
/// `$VAR` and `${VAR}` references in them are expanded from the environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "runlog",
    version,
    about = "Run a command in a directory and record its stdout/stderr as JSON log lines.",
    long_about = None
)]
pub struct CliArgs {
    /// Working directory the command runs in.
    #[arg(value_name = "DIR")]
    pub dir: Option<String>,

    /// Log file to create (truncated if it exists).
    #[arg(value_name = "LOG_FILE")]
    pub log_file: Option<String>,

    /// Full command line, e.g. "python -m http.server 8000".
    #[arg(value_name = "COMMAND")]
    pub command: Option<String>,

    /// TOML file with a `[run]` table providing `dir`, `log` and `cmd`.
    ///
    /// Positional arguments override values from the file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RUNLOG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Expand and tokenize, print the result, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// Positional values as a raw run spec, for merging with the config file.
    pub fn run_spec(&self) -> RawRunSpec {
        RawRunSpec::new(
            self.dir.clone(),
            self.log_file.clone(),
            self.command.clone(),
        )
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
