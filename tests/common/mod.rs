#![allow(dead_code)]

use std::path::Path;

use runlog::config::{RawRunSpec, RunSpec};

pub use runlog_test_utils::init_tracing;

/// Build a validated spec for running `cmd` in `dir`, logging to `log`.
pub fn spec(dir: &Path, log: &Path, cmd: &str) -> RunSpec {
    let raw = RawRunSpec::new(
        Some(dir.display().to_string()),
        Some(log.display().to_string()),
        Some(cmd.to_string()),
    );
    RunSpec::try_from(raw).expect("spec should validate")
}
