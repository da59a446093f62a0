use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Location of the history file, relative to the user's home directory
pub const HISTORY_FILE: &str = "~/.cache/git-co-history.json";

/// Version-control program invoked for checkout and ref resolution
pub const GIT_PROGRAM: &str = "git";

/// Expand tilde (~) in path to user's home directory
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    if let Some(s) = path.to_str() {
        if let Some(stripped) = s.strip_prefix("~/") {
            return home_dir().map(|home| home.join(stripped));
        } else if s == "~" {
            return home_dir();
        }
    }
    Ok(path.to_path_buf())
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Could not determine home directory for history file")
}

/// Runtime configuration for git-co
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding the per-directory checkout history, possibly
    /// `~`-relative. Expanded when the history is first touched.
    pub history_path: PathBuf,
    /// Program run for `checkout` and `rev-parse`
    pub git_program: PathBuf,
}

impl Config {
    /// Configuration from built-in defaults. Does not touch the filesystem
    /// or look up the home directory, so a checkout never depends on them.
    pub fn load() -> Self {
        Config {
            history_path: PathBuf::from(HISTORY_FILE),
            git_program: PathBuf::from(GIT_PROGRAM),
        }
    }
}
