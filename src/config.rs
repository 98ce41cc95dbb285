use std::path::PathBuf;

/// Default package manager used for reinstalling
pub const DEFAULT_INSTALLER: &str = "yarn";

/// Settings for a run, passed explicitly to every component that needs them.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_path: PathBuf,
    pub verbose: bool,
    pub installer_program: String,
    /// Remove the lock file and install directory before reinstalling
    pub clean: bool,
    /// Glob restricting which packages are reinstalled
    pub filter: Option<String>,
}

impl Config {
    pub fn new(project_path: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            project_path: project_path.into(),
            verbose,
            installer_program: DEFAULT_INSTALLER.to_string(),
            clean: true,
            filter: None,
        }
    }
}
