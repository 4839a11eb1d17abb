// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`process`] spawns the command with `tokio::process::Command`, piping
//!   stdout and stderr, and waits for it to exit.
//! - [`pump`] drains one pipe into a [`LogWriter`](crate::sink::LogWriter),
//!   one record per read.
//! - [`resolve`] finds the binary a command token names on `PATH`, for
//!   logging.

pub mod process;
pub mod pump;
pub mod resolve;

pub use process::{check_status, run_process, run_with_handle};
pub use pump::{pump, PumpStats, CHUNK_SIZE};
pub use resolve::resolve_executable;
