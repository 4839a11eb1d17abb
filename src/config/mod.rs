// src/config/mod.rs

//! Run configuration.
//!
//! - [`model`] holds the raw (optional, unexpanded) fields and the validated
//!   [`RunSpec`].
//! - [`loader`] reads an optional TOML file and merges it with the command
//!   line.
//! - [`validate`] turns a [`RawRunSpec`] into a [`RunSpec`]: presence checks,
//!   environment expansion and command tokenizing.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, resolve};
pub use model::{RawConfigFile, RawRunSpec, RunSpec};
