// src/lib.rs

pub mod cli;
pub mod command;
pub mod config;
pub mod errors;
pub mod exec;
pub mod expand;
pub mod logging;
pub mod sink;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::RunSpec;
use crate::errors::Result;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config file + positional arguments, expanded and validated
/// - command tokenizing (fails before anything is opened or spawned)
/// - log file creation
/// - the process itself, with both output streams recorded
pub async fn run(args: CliArgs) -> Result<()> {
    let spec = config::resolve(args.config.as_deref(), args.run_spec())?;

    if args.dry_run {
        print_dry_run(&spec);
        return Ok(());
    }

    info!(
        executable = %spec.command().executable(),
        dir = ?spec.dir(),
        "launching command"
    );

    let status = exec::run_process(&spec).await?;
    exec::check_status(status)
}

/// Print the expanded inputs and the tokenized command line.
fn print_dry_run(spec: &RunSpec) {
    println!("runlog dry-run");
    println!("  dir: {}", spec.dir().display());
    println!("  log: {}", spec.log().display());
    println!("  cmd: {}", spec.name());
    println!("  executable: {}", spec.command().executable());
    println!("  args ({}):", spec.command().args().len());
    for arg in spec.command().args() {
        println!("    - {arg:?}");
    }

    debug!("dry-run complete (no execution)");
}
