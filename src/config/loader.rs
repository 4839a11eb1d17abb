// src/config/loader.rs

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::config::model::{RawConfigFile, RawRunSpec, RunSpec};
use crate::errors::Result;

/// Read and deserialize a TOML config file. No validation is done here.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {:?}", path))?;

    let config: RawConfigFile = toml::from_str(&contents)?;
    debug!(path = ?path, run = ?config.run, "loaded config file");

    Ok(config)
}

/// Merge the optional config file with values given on the command line
/// (command line wins), then validate.
///
/// This is the entry point the orchestrator uses:
///
/// - reads the `[run]` table from `config_path`, if any
/// - overlays `cli`
/// - expands `$VAR` / `${VAR}` in all three fields
/// - tokenizes the command
pub fn resolve(config_path: Option<&Path>, cli: RawRunSpec) -> Result<RunSpec> {
    let base = match config_path {
        Some(path) => load_from_path(path)?.run,
        None => RawRunSpec::default(),
    };
    RunSpec::try_from(base.overlay(cli))
}
