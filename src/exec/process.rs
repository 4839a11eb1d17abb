// src/exec/process.rs

//! Launch the command and route its output into the log file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;

use anyhow::Context;
use tokio::io::AsyncRead;
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::command::ParsedCommand;
use crate::config::RunSpec;
use crate::errors::{Result, RunlogError};
use crate::exec::pump::{pump, PumpStats};
use crate::exec::resolve::resolve_executable;
use crate::sink::{shared, LogWriter, SharedHandle, Stream};

/// Create (or truncate) the log file named by `spec` and run the command
/// to completion with its stdout/stderr recorded there.
pub async fn run_process(spec: &RunSpec) -> Result<ExitStatus> {
    let file = File::create(spec.log())
        .with_context(|| format!("creating log file {:?}", spec.log()))?;
    info!(log = ?spec.log(), "writing process output");

    run_with_handle(spec.command(), spec.dir(), spec.name(), shared(file)).await
}

/// Run `command` in `dir` with both output streams logged to `handle`.
///
/// `name` is stamped on every record. An empty `dir` keeps the current
/// working directory. Stdin is not connected.
///
/// The returned status is whatever the child exited with; turning a non-zero
/// exit into an error is left to [`check_status`].
pub async fn run_with_handle<W>(
    command: &ParsedCommand,
    dir: &Path,
    name: &str,
    handle: SharedHandle<W>,
) -> Result<ExitStatus>
where
    W: Write + Send + 'static,
{
    let (stdout_log, stderr_log) = LogWriter::pair(name, Arc::clone(&handle));

    let mut cmd = Command::new(command.executable());
    cmd.args(command.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if !dir.as_os_str().is_empty() {
        cmd.current_dir(dir);
    }

    let mut child = cmd.spawn().map_err(|source| RunlogError::Spawn {
        executable: command.executable().to_string(),
        source,
    })?;

    let resolved = resolve_executable(command.executable(), dir);
    info!(
        executable = %command.executable(),
        resolved = ?resolved,
        args = ?command.args(),
        dir = ?dir,
        pid = child.id(),
        "started process"
    );

    let (failed_tx, mut failed_rx) = mpsc::channel::<Stream>(2);
    let pumps: Vec<JoinHandle<io::Result<PumpStats>>> = [
        child
            .stdout
            .take()
            .map(|out| spawn_pump(out, stdout_log, failed_tx.clone())),
        child
            .stderr
            .take()
            .map(|err| spawn_pump(err, stderr_log, failed_tx.clone())),
    ]
    .into_iter()
    .flatten()
    .collect();
    drop(failed_tx);

    let status = wait_or_kill(&mut child, &mut failed_rx).await?;
    info!(
        exit_code = status.code().unwrap_or(-1),
        success = status.success(),
        "process exited"
    );

    // The pipes close when the child exits, unless it left a grandchild
    // holding them; in that case we keep draining until they go away too.
    for task in pumps {
        match task.await {
            Ok(Ok(stats)) => debug!(?stats, "pump finished"),
            Ok(Err(err)) => warn!(error = %err, "reading process output failed"),
            Err(err) => warn!(error = %err, "output pump task panicked or was cancelled"),
        }
    }

    handle
        .lock()
        .map_err(|_| RunlogError::Write(io::Error::other("log handle lock poisoned")))?
        .flush()
        .map_err(RunlogError::Write)?;

    Ok(status)
}

/// Drain one pipe on its own task. A read error is reported on `failed`
/// before the task ends.
fn spawn_pump<R, W>(
    reader: R,
    writer: LogWriter<W>,
    failed: mpsc::Sender<Stream>,
) -> JoinHandle<io::Result<PumpStats>>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: Write + Send + 'static,
{
    let stream = writer.stream();
    tokio::spawn(async move {
        let result = pump(reader, writer).await;
        if result.is_err() {
            let _ = failed.send(stream).await;
        }
        result
    })
}

/// Wait for `child` to exit, killing it first if one of its output pipes
/// stops being drained. A child writing into an undrained pipe would block
/// forever once the pipe buffer fills.
async fn wait_or_kill(
    child: &mut Child,
    failed: &mut mpsc::Receiver<Stream>,
) -> io::Result<ExitStatus> {
    tokio::select! {
        status = child.wait() => status,
        Some(stream) = failed.recv() => {
            warn!(%stream, "output pipe can no longer be read; killing process");
            if let Err(err) = child.kill().await {
                warn!(error = %err, "failed to kill process");
            }
            child.wait().await
        }
    }
}

/// Map a non-successful exit to [`RunlogError::ProcessFailed`].
///
/// A child killed by a signal has no code and is reported as `-1`.
pub fn check_status(status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(RunlogError::ProcessFailed {
            code: status.code().unwrap_or(-1),
        })
    }
}
