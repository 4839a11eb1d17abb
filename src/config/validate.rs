// src/config/validate.rs

use std::path::PathBuf;

use tracing::debug;

use crate::command;
use crate::config::model::{RawRunSpec, RunSpec};
use crate::errors::{Result, RunlogError};
use crate::expand::expand_env;

impl TryFrom<RawRunSpec> for RunSpec {
    type Error = RunlogError;

    fn try_from(raw: RawRunSpec) -> std::result::Result<Self, Self::Error> {
        let (dir, log, cmd) = require_all(raw)?;

        let dir = expand_env(&dir);
        let log = expand_env(&log);
        let name = expand_env(&cmd);
        debug!(%dir, %log, cmd = %name, "expanded run inputs");

        if log.trim().is_empty() {
            return Err(RunlogError::Config(
                "log file path is empty after expansion".to_string(),
            ));
        }

        let command = command::parse(&name)?;

        Ok(RunSpec::new_unchecked(
            PathBuf::from(dir),
            PathBuf::from(log),
            name,
            command,
        ))
    }
}

fn require_all(raw: RawRunSpec) -> Result<(String, String, String)> {
    match (raw.dir, raw.log, raw.cmd) {
        (Some(dir), Some(log), Some(cmd)) => Ok((dir, log, cmd)),
        _ => Err(RunlogError::Config(
            "a directory, log file and command is required".to_string(),
        )),
    }
}
