//! Stub file discovery.
//!
//! Lists the regular files directly inside the input directory whose
//! extension matches the filter. Results are sorted so repeated runs see the
//! same order.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Default stub extension (decompiled C# classes).
pub const DEFAULT_EXTENSION: &str = "cs";

/// Find `*.<ext>` files in `dir` (non-recursive).
pub fn find_stub_files(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() || std::fs::read_dir(dir).is_err() {
        return Err(Error::InputNotFound(dir.to_path_buf()));
    }

    let ext = ext.trim_start_matches('.');
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        glob::Pattern::escape(ext)
    );

    let mut files: Vec<PathBuf> = glob::glob(&pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}
