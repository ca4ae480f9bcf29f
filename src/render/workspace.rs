//! Transient workspace lifecycle
//!
//! Every file a request materializes in the work directory is named after
//! the request's content hash. [`WorkspaceGuard`] sweeps all of them when it
//! goes out of scope, so cleanup runs on every exit path, including early
//! `?` returns and propagated errors. The resolved output artifact is the
//! caller's result and is excluded from the sweep.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Scoped cleanup of hash-named files in the work directory.
///
/// Cleanup is best-effort: individual removal failures are logged at `warn`
/// and never surface as a request failure.
pub struct WorkspaceGuard {
    dir: PathBuf,
    prefix: String,
    keep: Option<OsString>,
}

impl WorkspaceGuard {
    /// Guard all files in `dir` whose name starts with `prefix`.
    ///
    /// `keep` names the output artifact to exclude from the sweep when it
    /// lives inside the same directory.
    pub fn new(dir: &Path, prefix: &str, keep: Option<&Path>) -> Self {
        let keep = keep
            .filter(|path| path.parent() == Some(dir))
            .and_then(|path| path.file_name())
            .map(OsString::from);

        Self {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            keep,
        }
    }
}

impl Drop for WorkspaceGuard {
    fn drop(&mut self) {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Skipping workspace cleanup, cannot read {}: {}", self.dir.display(), e);
                return;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            let matches_prefix = name
                .to_str()
                .is_some_and(|n| n.starts_with(self.prefix.as_str()));

            if !matches_prefix || Some(&name) == self.keep.as_ref() {
                continue;
            }

            match fs::remove_file(entry.path()) {
                Ok(()) => debug!("Removed transient file {}", entry.path().display()),
                Err(e) => warn!("Failed to remove {}: {}", entry.path().display(), e),
            }
        }
    }
}
