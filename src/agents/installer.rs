use crate::error::{PkgsyncError, Result};
use crate::manifest::GroupSelector;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::process::Command;

/// Package manager that reinstalls the packages of one declaration group.
#[async_trait(?Send)]
pub trait Installer {
    /// Install `packages` into the group named by `selector`.
    ///
    /// Resolves to the process exit status. An `Err` means the process could not
    /// be run at all.
    async fn invoke(&self, selector: GroupSelector, packages: &[String]) -> Result<i32>;
}

/// Runs `<program> add [flag] <packages>` in the project directory
pub struct YarnInstaller {
    program: String,
    project_path: PathBuf,
    verbose: bool,
}

impl YarnInstaller {
    pub fn new<P: AsRef<Path>>(program: impl Into<String>, project_path: P, verbose: bool) -> Self {
        Self {
            program: program.into(),
            project_path: project_path.as_ref().to_path_buf(),
            verbose,
        }
    }

    pub fn build_args(selector: GroupSelector, packages: &[String]) -> Vec<String> {
        let mut args = vec!["add".to_string()];
        if let Some(flag) = selector.flag() {
            args.push(flag.to_string());
        }
        args.extend(packages.iter().cloned());
        args
    }

    fn output_mode(&self) -> Stdio {
        if self.verbose {
            Stdio::piped()
        } else {
            Stdio::null()
        }
    }
}

#[async_trait(?Send)]
impl Installer for YarnInstaller {
    async fn invoke(&self, selector: GroupSelector, packages: &[String]) -> Result<i32> {
        let args = Self::build_args(selector, packages);
        tracing::info!("  {} {}", self.program, args.join(" "));

        let mut child = Command::new(&self.program)
            .current_dir(&self.project_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(self.output_mode())
            .stderr(self.output_mode())
            .spawn()
            .map_err(|e| {
                PkgsyncError::Installer(format!("Failed to spawn {}: {}", self.program, e))
            })?;

        let stdout = child
            .stdout
            .take()
            .map(|s| tokio::spawn(forward(s, tokio::io::stdout())));
        let stderr = child
            .stderr
            .take()
            .map(|s| tokio::spawn(forward(s, tokio::io::stderr())));

        let status = child.wait().await.map_err(|e| {
            PkgsyncError::Installer(format!("Failed to wait for {}: {}", self.program, e))
        })?;

        for handle in [stdout, stderr].into_iter().flatten() {
            let _ = handle.await;
        }

        // Killed by a signal: no code, count it as a failure.
        Ok(status.code().unwrap_or(-1))
    }
}

/// Copy a child stream byte for byte until it closes.
///
/// The pipe is drained to the end even when writing fails, so the child never
/// writes into a closed pipe.
async fn forward<R, W>(mut stream: R, mut out: W)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    if let Err(e) = tokio::io::copy(&mut stream, &mut out).await {
        tracing::debug!("Installer output no longer forwarded: {}", e);
        let _ = tokio::io::copy(&mut stream, &mut tokio::io::sink()).await;
    }
}
