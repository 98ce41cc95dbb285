use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// A path that could not be removed
#[derive(Debug)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub error: io::Error,
}

/// Removes the lock file and install directory before reinstalling.
///
/// Failures are returned for the caller to show and do not stop the run; the
/// installer copes with stale state.
pub async fn remove_install_state(lockfile: &Path, modules_dir: &Path) -> Vec<CleanupFailure> {
    tracing::info!("Removing {} and {}", lockfile.display(), modules_dir.display());

    let mut failures = Vec::new();
    let results = [
        (modules_dir, tokio::fs::remove_dir_all(modules_dir).await),
        (lockfile, tokio::fs::remove_file(lockfile).await),
    ];

    for (path, result) in results {
        match result {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(error) => {
                tracing::warn!("Failed to remove {}: {}", path.display(), error);
                failures.push(CleanupFailure {
                    path: path.to_path_buf(),
                    error,
                });
            }
        }
    }

    failures
}
