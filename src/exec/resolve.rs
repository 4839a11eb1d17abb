// src/exec/resolve.rs

//! Locate the executable a command token refers to, the way `PATH` lookup
//! does, for reporting which binary was started.
//!
//! This never gates the launch: a token that doesn't resolve is still
//! handed to the OS as is.

use std::path::{Path, PathBuf};

/// Resolve `executable` against `PATH`.
///
/// A token containing a path separator is taken as a path (relative ones
/// against `dir` when `dir` is non-empty) and only checked for existence.
pub fn resolve_executable(executable: &str, dir: &Path) -> Option<PathBuf> {
    let path = std::env::var_os("PATH").unwrap_or_default();
    resolve_in(executable, dir, std::env::split_paths(&path))
}

fn resolve_in<I>(executable: &str, dir: &Path, search: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    if executable.is_empty() {
        return None;
    }

    let candidate = Path::new(executable);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        let full = if candidate.is_relative() && !dir.as_os_str().is_empty() {
            dir.join(candidate)
        } else {
            candidate.to_path_buf()
        };
        return full.is_file().then_some(full);
    }

    search.into_iter().find_map(|entry| {
        let direct = entry.join(executable);
        if direct.is_file() {
            return Some(direct);
        }
        if !cfg!(windows) {
            return None;
        }
        [".exe", ".cmd", ".bat", ".com"]
            .into_iter()
            .map(|ext| entry.join(format!("{executable}{ext}")))
            .find(|c| c.is_file())
    })
}
