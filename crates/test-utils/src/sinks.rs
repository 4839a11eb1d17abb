//! Handles and readers for exercising `runlog::sink` in tests.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use runlog::sink::{read_records, LogLine, SharedHandle};

/// A handle whose writes always fail with `kind`.
///
/// Counts the attempts so tests can check that every chunk was tried.
#[derive(Debug, Clone)]
pub struct FailingWriter {
    kind: io::ErrorKind,
    attempts: Arc<Mutex<usize>>,
}

impl FailingWriter {
    pub fn new(kind: io::ErrorKind) -> Self {
        Self {
            kind,
            attempts: Arc::new(Mutex::new(0)),
        }
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        *self.attempts.lock().unwrap() += 1;
        Err(io::Error::new(self.kind, "injected write failure"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Parse every record in the log file at `path`.
pub fn read_log_file(path: impl AsRef<Path>) -> Vec<LogLine> {
    let file = File::open(path.as_ref()).expect("open log file");
    read_records(BufReader::new(file)).expect("log file holds valid records")
}

/// Parse every record written so far to an in-memory handle.
pub fn read_log_buffer(handle: &SharedHandle<Vec<u8>>) -> Vec<LogLine> {
    let bytes = handle.lock().unwrap().clone();
    read_records(bytes.as_slice()).expect("buffer holds valid records")
}

/// Raw lines of the log file, for checks on the wire format itself.
pub fn raw_lines(path: impl AsRef<Path>) -> Vec<serde_json::Value> {
    std::fs::read_to_string(path.as_ref())
        .expect("read log file")
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("each line is JSON"))
        .collect()
}
