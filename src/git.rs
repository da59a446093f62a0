use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::Error;

/// Operations git-co needs from the version-control tool
pub trait Git {
    /// Run `checkout` with `args`, sharing this process's stdin/stdout/stderr.
    /// Fails if the command cannot be started or exits non-zero.
    fn checkout(&self, args: &[OsString]) -> Result<()>;

    /// Whether `reference` resolves to a commit-ish in the current repository.
    /// Any resolution failure is `false`.
    fn commit_exists(&self, reference: &str) -> bool;
}

/// `Git` implementation that spawns the real git binary
pub struct SystemGit {
    program: PathBuf,
    work_dir: PathBuf,
}

impl SystemGit {
    pub fn new<P: AsRef<Path>, D: AsRef<Path>>(program: P, work_dir: D) -> Self {
        SystemGit {
            program: program.as_ref().to_path_buf(),
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.current_dir(&self.work_dir);
        cmd
    }
}

impl Git for SystemGit {
    fn checkout(&self, args: &[OsString]) -> Result<()> {
        tracing::debug!("running git checkout {:?}", args);

        let status = self
            .command()
            .arg("checkout")
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(Error::from)
            .context("Failed to execute git checkout")?;

        if !status.success() {
            return Err(Error::Git(format!("git checkout failed: {}", status)).into());
        }

        Ok(())
    }

    fn commit_exists(&self, reference: &str) -> bool {
        let status = self
            .command()
            .arg("rev-parse")
            .arg(reference)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::warn!("Failed to execute git rev-parse: {}", e);
                false
            }
        }
    }
}
