//! Locating and creating the `.tally/` metadata directory.
//!
//! A project's database and `config.yaml` live together in `.tally/`.
//! Discovery mirrors how version-control tools find their dot-directory:
//! an environment override first, then an upward walk from the working
//! directory.

use std::path::{Path, PathBuf};

use crate::config::ConfigError;

const TALLY_DIR_NAME: &str = ".tally";

/// Overrides discovery entirely when set to an existing directory.
const TALLY_DIR_ENV: &str = "TALLY_DIR";

/// Finds the nearest `.tally/` directory.
///
/// `TALLY_DIR` wins when it points at an existing directory; otherwise
/// every ancestor of `start` (itself included) is checked in order.
/// Returns `None` when the walk reaches the filesystem root empty-handed.
pub fn find_tally_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(TALLY_DIR_ENV) {
        let dir = PathBuf::from(dir);
        if dir.is_dir() {
            return Some(dir);
        }
    }

    // Absolute ancestors only; a relative walk would stop at "".
    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(TALLY_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Creates (if needed) and returns the `.tally/` directory under `path`.
/// A `path` already named `.tally` is used as-is.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] when the directory cannot be created.
pub fn ensure_tally_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let tally_dir = if path.ends_with(TALLY_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(TALLY_DIR_NAME)
    };
    std::fs::create_dir_all(&tally_dir)?;
    Ok(tally_dir)
}
