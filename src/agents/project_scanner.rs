use crate::error::{PkgsyncError, Result};
use crate::manifest::MANIFEST_FILE;
use std::path::{Path, PathBuf};

const LOCKFILE: &str = "yarn.lock";
const MODULES_DIR: &str = "node_modules";

/// Directories pkgsync refuses to run in.
const FORBIDDEN: &[&str] = &["/etc", "/sys", "/proc", "/dev", "/boot"];

/// ProjectScannerAgent validates the project structure
pub struct ProjectScannerAgent {
    project_path: PathBuf,
}

impl ProjectScannerAgent {
    pub fn new<P: AsRef<Path>>(project_path: P) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Validates the project structure
    pub fn validate(&self) -> Result<ProjectInfo> {
        let project_path = Self::canonical_project_dir(&self.project_path)?;

        let manifest_path = project_path.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(PkgsyncError::ProjectValidation(format!(
                "{} not found in {}",
                MANIFEST_FILE,
                project_path.display()
            )));
        }

        Ok(ProjectInfo {
            lockfile_path: project_path.join(LOCKFILE),
            modules_path: project_path.join(MODULES_DIR),
            manifest_path,
            project_path,
        })
    }

    fn canonical_project_dir(path: &Path) -> Result<PathBuf> {
        let canonical = path.canonicalize().map_err(|e| {
            PkgsyncError::ProjectValidation(format!("Invalid path '{}': {e}", path.display()))
        })?;

        if !canonical.is_dir() {
            return Err(PkgsyncError::ProjectValidation(format!(
                "Path '{}' is not a directory",
                canonical.display()
            )));
        }

        let forbidden = FORBIDDEN.iter().find(|dir| {
            let dir = Path::new(dir);
            canonical.starts_with(dir)
                || dir
                    .canonicalize()
                    .is_ok_and(|resolved| canonical.starts_with(resolved))
        });
        if let Some(dir) = forbidden {
            return Err(PkgsyncError::ProjectValidation(format!(
                "Access to system directory '{}' is not allowed",
                dir
            )));
        }

        Ok(canonical)
    }
}

#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub project_path: PathBuf,
    pub manifest_path: PathBuf,
    pub lockfile_path: PathBuf,
    pub modules_path: PathBuf,
}
