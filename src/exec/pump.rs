// src/exec/pump.rs

//! Copy a child's output pipe into a [`LogWriter`], one record per read.

use std::io::{self, Write};

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use crate::sink::LogWriter;

/// Upper bound on the bytes delivered to a single record.
pub const CHUNK_SIZE: usize = 8 * 1024;

/// Counters for one pumped stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpStats {
    /// Chunks read from the pipe (one record attempted per chunk).
    pub chunks: usize,
    /// Bytes read from the pipe.
    pub bytes: usize,
    /// Chunks whose record could not be written.
    pub failed: usize,
}

/// Read `reader` until EOF, handing every chunk to `writer`.
///
/// A failed record write is logged and counted; pumping carries on with the
/// next chunk so the child never blocks on a full pipe. Only a read error
/// on the pipe itself ends the pump early; the process layer then kills the
/// child rather than leave it writing into a pipe nobody reads.
pub async fn pump<R, W>(mut reader: R, writer: LogWriter<W>) -> io::Result<PumpStats>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut stats = PumpStats::default();

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }

        stats.chunks += 1;
        stats.bytes += n;

        if let Err(err) = writer.write_chunk(&buf[..n]) {
            stats.failed += 1;
            warn!(
                stream = %writer.stream(),
                error = %err,
                "could not record output chunk"
            );
        }
    }

    debug!(stream = %writer.stream(), ?stats, "output stream closed");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::sink::{read_records, shared, Stream};

    #[tokio::test]
    async fn every_read_becomes_a_record() {
        let handle = shared(Vec::new());
        let writer = LogWriter::new("gen", Stream::Stdout, Arc::clone(&handle));

        let (mut tx, rx) = tokio::io::duplex(64);
        let producer = tokio::spawn(async move {
            use tokio::io::AsyncWriteExt;
            tx.write_all(b"first\n").await.unwrap();
            tx.flush().await.unwrap();
            tokio::task::yield_now().await;
            drop(tx);
        });

        let stats = pump(rx, writer).await.unwrap();
        producer.await.unwrap();

        assert_eq!(stats.bytes, 6);
        assert_eq!(stats.failed, 0);

        let bytes = handle.lock().unwrap().clone();
        let records = read_records(bytes.as_slice()).unwrap();
        assert_eq!(records.len(), stats.chunks);
        assert_eq!(records[0].message, "first");
    }

    #[tokio::test]
    async fn large_input_is_split_at_chunk_size() {
        let handle = shared(Vec::new());
        let writer = LogWriter::new("big", Stream::Stderr, Arc::clone(&handle));

        let input = vec![b'x'; CHUNK_SIZE * 2 + 10];
        let stats = pump(input.as_slice(), writer).await.unwrap();

        assert_eq!(stats.bytes, input.len());
        assert_eq!(stats.chunks, 3);

        let bytes = handle.lock().unwrap().clone();
        let records = read_records(bytes.as_slice()).unwrap();
        let total: usize = records.iter().map(|r| r.message.len()).sum();
        assert_eq!(total, input.len());
    }

    #[tokio::test]
    async fn write_failures_do_not_stop_the_pump() {
        struct Refuse;
        impl Write for Refuse {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let writer = LogWriter::new("x", Stream::Stdout, shared(Refuse));
        let input = vec![b'y'; CHUNK_SIZE + 1];
        let stats = pump(input.as_slice(), writer).await.unwrap();

        assert_eq!(stats.chunks, 2);
        assert_eq!(stats.failed, 2);
    }
}
