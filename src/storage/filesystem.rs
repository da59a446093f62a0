use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use super::traits::HistoryStore;
use super::History;
use crate::config::expand_tilde;
use crate::error::Error;

/// History persisted as a single JSON object in a flat file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the JSON file at `path`.
    /// A leading `~` is expanded on first access, not here.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        JsonFileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the history file with `~` expanded
    fn resolved_path(&self) -> Result<PathBuf> {
        expand_tilde(&self.path)
    }

    /// Create the history file (and its directory) if it does not exist yet
    fn ensure_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(Error::from)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        tracing::debug!("creating empty history file {:?}", path);
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(Error::from)
            .with_context(|| format!("Failed to create history file {:?}", path))?;

        Ok(())
    }

    /// File the new contents are renamed onto.
    /// A symlinked history file is written through, keeping the link.
    fn write_target(path: &Path) -> PathBuf {
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_symlink() => {
                fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
            }
            _ => path.to_path_buf(),
        }
    }

    /// Permissions for the rewritten file: those of the file being replaced,
    /// or the usual 0644 for a new one
    fn target_permissions(target: &Path) -> Option<fs::Permissions> {
        match fs::metadata(target) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => default_permissions(),
        }
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

impl HistoryStore for JsonFileStore {
    fn read_history(&self) -> Result<History> {
        let path = self.resolved_path()?;
        Self::ensure_file(&path)?;

        let content = fs::read(&path)
            .map_err(Error::from)
            .with_context(|| format!("Failed to read history file {:?}", path))?;

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(History::default());
        }

        let history = serde_json::from_slice(&content)
            .map_err(Error::from)
            .with_context(|| format!("Failed to parse history file {:?}", path))?;

        tracing::debug!("loaded history from {:?}", path);
        Ok(history)
    }

    fn write_history(&self, history: &History) -> Result<()> {
        let target = Self::write_target(&self.resolved_path()?);
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)
            .map_err(Error::from)
            .with_context(|| format!("Failed to create directory {:?}", dir))?;

        let json = serde_json::to_vec(history)
            .map_err(Error::from)
            .context("Failed to serialize history")?;

        // 1. Write to temp file next to the target
        let mut temp_file = NamedTempFile::new_in(dir)
            .map_err(Error::from)
            .with_context(|| format!("Failed to create temporary file in {:?}", dir))?;
        temp_file
            .write_all(&json)
            .map_err(Error::from)
            .context("Failed to write history to temporary file")?;

        // Temp files are created 0600
        if let Some(permissions) = Self::target_permissions(&target) {
            temp_file
                .as_file()
                .set_permissions(permissions)
                .map_err(Error::from)
                .context("Failed to set history file permissions")?;
        }

        // 2. Atomic rename (atomic on POSIX systems)
        temp_file
            .persist(&target)
            .map_err(|e| Error::from(e.error))
            .with_context(|| format!("Failed to write history file {:?}", target))?;

        tracing::debug!("saved history to {:?}", target);
        Ok(())
    }

    fn update_history<F>(&self, update_fn: F) -> Result<()>
    where
        F: FnOnce(&mut History) -> Result<()>,
    {
        // 1. Read current history
        let mut history = self.read_history()?;

        // 2. Apply updates
        update_fn(&mut history)?;

        // 3. Write atomically
        self.write_history(&history)
    }
}
