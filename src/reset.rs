use crate::error::{ExtractError, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Outcome of clearing the snippet directory
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResetStats {
    pub removed: usize,
    pub failed: usize,
}

/// Delete every regular file directly inside `dir` except `placeholder`.
///
/// Subdirectories are left alone. A file that cannot be removed is logged and
/// skipped; only failing to list `dir` itself is an error.
pub fn clear_output_dir(dir: &Path, placeholder: &str) -> Result<ResetStats> {
    clear_output_dir_with(dir, placeholder, |path| fs::remove_file(path))
}

/// Same walk as [`clear_output_dir`], with the per-file removal supplied by the caller.
pub fn clear_output_dir_with<F>(dir: &Path, placeholder: &str, mut remove: F) -> Result<ResetStats>
where
    F: FnMut(&Path) -> io::Result<()>,
{
    let mut stats = ResetStats::default();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|source| ExtractError::ListDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        // `Path::is_file` follows symlinks, so a link to a file counts as a file.
        if !path.is_file() || entry.file_name() == placeholder {
            continue;
        }

        match remove(path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed stale snippet");
                stats.removed += 1;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not remove stale snippet");
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}
