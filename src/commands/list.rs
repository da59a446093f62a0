use anyhow::Result;
use std::io::Write;
use std::path::Path;

use super::dir_key;
use crate::storage::HistoryStore;

/// Handle `--list`
/// Output the refs recorded for `cwd`, most recent first, one per line
pub fn handle<S: HistoryStore, W: Write>(store: &S, cwd: &Path, output: &mut W) -> Result<()> {
    let history = store.read_history()?;

    for reference in history.refs(&dir_key(cwd)).iter().rev() {
        writeln!(output, "{}", reference)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{History, JsonFileStore};
    use tempfile::TempDir;

    #[test]
    fn test_list_most_recent_first() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = JsonFileStore::new(temp_dir.path().join("history.json"));
        std::fs::write(
            temp_dir.path().join("history.json"),
            r#"{"/work/d":["main","feature-x"],"/work/e":["dev"]}"#,
        )?;

        let mut output = Vec::new();
        handle(&store, Path::new("/work/d"), &mut output)?;

        assert_eq!(String::from_utf8(output)?, "feature-x\nmain\n");
        Ok(())
    }

    #[test]
    fn test_list_unknown_directory_prints_nothing() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = JsonFileStore::new(temp_dir.path().join("history.json"));
        let mut history = History::default();
        history.record("/work/d", "main");
        store.write_history(&history)?;

        let mut output = Vec::new();
        handle(&store, Path::new("/work/other"), &mut output)?;

        assert!(output.is_empty());
        Ok(())
    }

    #[test]
    fn test_list_without_history_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("history.json");
        let store = JsonFileStore::new(&path);

        let mut output = Vec::new();
        handle(&store, temp_dir.path(), &mut output)?;

        assert!(output.is_empty());
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn test_list_malformed_history_fails() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("history.json");
        std::fs::write(&path, "not json")?;

        let mut output = Vec::new();
        assert!(handle(&JsonFileStore::new(&path), temp_dir.path(), &mut output).is_err());
        assert!(output.is_empty());
        Ok(())
    }
}
