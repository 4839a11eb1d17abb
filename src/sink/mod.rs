// src/sink/mod.rs

//! Structured log sink for a supervised process.
//!
//! - [`record`] defines the JSON line format (`Name`, `Time`, `Stream`,
//!   `Message`) and a reader for it.
//! - [`writer`] provides [`LogWriter`], the adapter that turns each output
//!   chunk into one record appended to a shared handle.

pub mod record;
pub mod writer;

pub use record::{read_records, LogLine, LogRecord, Stream};
pub use writer::{shared, LogWriter, SharedHandle};
