// src/sink/writer.rs

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::warn;

use crate::errors::{Result, RunlogError};
use crate::sink::record::{LogRecord, Stream};

/// Output handle shared by the stdout and stderr writers of one process.
pub type SharedHandle<W> = Arc<Mutex<W>>;

/// Wrap a handle so it can be shared between writers.
pub fn shared<W>(handle: W) -> SharedHandle<W> {
    Arc::new(Mutex::new(handle))
}

/// Turns raw output chunks from a process into JSON log lines.
///
/// Every call to [`write_chunk`](LogWriter::write_chunk) produces exactly one
/// record, whatever the chunk contains. There is no line assembly, so a
/// partial line is its own record and a chunk holding several lines is one
/// record.
///
/// The serialized line is appended with a single `write_all` while the
/// handle lock is held. Records from the two streams can interleave but a
/// record is never split by another one.
///
/// The append is synchronous, so when called from a tokio task it blocks
/// that worker for the duration of one write of at most one serialized
/// `CHUNK_SIZE` chunk. Larger chunks should go through `spawn_blocking`.
#[derive(Debug)]
pub struct LogWriter<W> {
    name: Arc<str>,
    stream: Stream,
    handle: SharedHandle<W>,
}

impl<W> Clone for LogWriter<W> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            stream: self.stream,
            handle: Arc::clone(&self.handle),
        }
    }
}

impl<W: Write> LogWriter<W> {
    pub fn new(name: impl Into<Arc<str>>, stream: Stream, handle: SharedHandle<W>) -> Self {
        Self {
            name: name.into(),
            stream,
            handle,
        }
    }

    /// Build the `(stdout, stderr)` writers for one command, sharing `handle`.
    pub fn pair(name: impl Into<Arc<str>>, handle: SharedHandle<W>) -> (Self, Self) {
        let stdout = Self::new(name, Stream::Stdout, handle);
        let stderr = Self {
            name: Arc::clone(&stdout.name),
            stream: Stream::Stderr,
            handle: Arc::clone(&stdout.handle),
        };
        (stdout, stderr)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stream(&self) -> Stream {
        self.stream
    }

    /// Record `chunk` as one log line.
    ///
    /// Returns `chunk.len()` on success. On a handle failure the error is
    /// returned and no count is reported; whatever part of the line may have
    /// reached the handle is not rolled back.
    pub fn write_chunk(&self, chunk: &[u8]) -> Result<usize> {
        let record = LogRecord::capture(&self.name, self.stream, chunk);
        let line = record.to_line()?;

        let mut handle = self.lock()?;
        if let Err(err) = handle.write_all(line.as_bytes()) {
            warn!(
                stream = %self.stream,
                chunk_len = chunk.len(),
                error = %err,
                "failed to append log record"
            );
            return Err(RunlogError::Write(err));
        }

        Ok(chunk.len())
    }

    /// Flush the shared handle.
    pub fn flush_handle(&self) -> Result<()> {
        self.lock()?.flush().map_err(RunlogError::Write)
    }

    fn lock(&self) -> Result<MutexGuard<'_, W>> {
        self.handle
            .lock()
            .map_err(|_| RunlogError::Write(io::Error::other("log handle lock poisoned")))
    }
}

impl<W: Write> Write for LogWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_chunk(buf).map_err(into_io_error)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_handle().map_err(into_io_error)
    }
}

fn into_io_error(err: RunlogError) -> io::Error {
    match err {
        RunlogError::Write(err) | RunlogError::Io(err) => err,
        other => io::Error::other(other),
    }
}
