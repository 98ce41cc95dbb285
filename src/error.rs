use thiserror::Error;

#[derive(Error, Debug)]
pub enum PkgsyncError {
    #[error("Project validation failed: {0}")]
    ProjectValidation(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Installer failed: {0}")]
    Installer(String),

    #[error("{0} package(s) have diverging versions across dependency groups")]
    OutOfSync(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PkgsyncError>;
